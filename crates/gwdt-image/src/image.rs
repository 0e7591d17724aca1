use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use gwdt_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for image data types.
///
/// Send and Sync is required for the rayon based row iterators.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored densely in row-major order with interleaved channels,
/// i.e. the element `[y, x, c]` lives at `(y * width + x) * CHANNELS + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwdt_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.as_slice().len(), 10 * 20 * 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwdt_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 1>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, f32::INFINITY).unwrap();
    ///
    /// assert_eq!(image.get([0, 0, 0]), Some(&f32::INFINITY));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the pixel data as a flat row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable flat row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, index: [usize; 3]) -> Option<usize> {
        let [y, x, c] = index;
        if y >= self.size.height || x >= self.size.width || c >= CHANNELS {
            return None;
        }
        Some((y * self.size.width + x) * CHANNELS + c)
    }

    /// Get a reference to the element at `[y, x, channel]`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        self.offset(index).map(|i| &self.data[i])
    }

    /// Get a mutable reference to the element at `[y, x, channel]`, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: [usize; 3]) -> Option<&mut T> {
        self.offset(index).map(move |i| &mut self.data[i])
    }

    /// Set the pixel value at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel or channel index is out of bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        self.check_index(x, y, ch)?;
        let idx = (y * self.size.width + x) * CHANNELS + ch;
        self.data[idx] = val;
        Ok(())
    }

    fn check_index(&self, x: usize, y: usize, ch: usize) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageDtype, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(ImageSize::from([10, 20]), image_size);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.get([19, 9, 2]), Some(&0));
        assert_eq!(image.get([0, 0, 3]), None);

        Ok(())
    }

    #[test]
    fn image_invalid_shape() {
        let res = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0.0; 8],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(8, 9)));
    }

    #[test]
    fn image_row_major_access() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;
        assert_eq!(image.get([1, 0, 0]), Some(&3));
        assert_eq!(image.get([0, 2, 0]), Some(&2));
        assert_eq!(image.get([2, 0, 0]), None);
        assert_eq!(image.get([0, 3, 0]), None);
        assert_eq!(image.get([1, 2, 0]), Some(&5));

        Ok(())
    }

    #[test]
    fn image_set_pixel() -> Result<(), ImageError> {
        let mut image = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        image.set_pixel(1, 0, 0, 7.0)?;
        if let Some(v) = image.get_mut([1, 1, 0]) {
            *v = 3.0;
        }
        assert_eq!(image.as_slice(), &[0.0, 7.0, 0.0, 3.0]);

        assert_eq!(
            image.set_pixel(2, 1, 0, 1.0),
            Err(ImageError::PixelIndexOutOfBounds(2, 1, 2, 2))
        );
        assert_eq!(
            image.set_pixel(0, 0, 1, 1.0),
            Err(ImageError::ChannelIndexOutOfBounds(1, 1))
        );

        Ok(())
    }

    #[test]
    fn dtype_from_f32_saturates() {
        assert_eq!(<u8 as ImageDtype>::from_f32(254.6), 255);
        assert_eq!(<u8 as ImageDtype>::from_f32(300.0), 255);
        assert_eq!(<u8 as ImageDtype>::from_f32(-4.0), 0);
        assert_eq!(<f32 as ImageDtype>::from_f32(1.5), 1.5);
    }
}
