/// Layout of the image data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
    /// How many elements we need to skip to get to the next row.
    pub row_stride: usize,
    /// How many elements we need to skip to get to the next column.
    pub col_stride: usize,
}

impl Shape {
    /// Row-major shape without padding
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            row_stride: width,
            col_stride: 1,
        }
    }

    /// Offset of the pixel at column `x` and row `y`, `None` if it is out of bounds
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.row_stride + x * self.col_stride)
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Two dimensional grid of pixels addressed by `(x, y)`, rows go top to bottom
pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn shape(&self) -> Shape;

    fn width(&self) -> usize {
        self.shape().width
    }

    fn height(&self) -> usize {
        self.shape().height
    }

    fn get(&self, x: usize, y: usize) -> Option<&Self::Pixel> {
        let offset = self.shape().offset(x, y)?;
        self.data().get(offset)
    }
}

pub trait ImageMut: Image {
    fn data_mut(&mut self) -> &mut [Self::Pixel];

    fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Self::Pixel> {
        let offset = self.shape().offset(x, y)?;
        self.data_mut().get_mut(offset)
    }

    /// Replace pixel value, returns `false` if the pixel is out of bounds
    fn set(&mut self, x: usize, y: usize, pixel: Self::Pixel) -> bool {
        match self.get_mut(x, y) {
            Some(slot) => {
                *slot = pixel;
                true
            }
            None => false,
        }
    }

    fn clear(&mut self)
    where
        Self::Pixel: Default,
    {
        let shape = self.shape();
        let data = self.data_mut();
        for y in 0..shape.height {
            for x in 0..shape.width {
                if let Some(offset) = shape.offset(x, y) {
                    data[offset] = Default::default();
                }
            }
        }
    }
}

/// Image that owns its row-major pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOwned<P> {
    shape: Shape,
    data: Vec<P>,
}

impl<P> ImageOwned<P> {
    pub fn new_default(width: usize, height: usize) -> Self
    where
        P: Default,
    {
        Self::new_with(width, height, |_, _| Default::default())
    }

    pub fn new_with<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let mut data = Vec::with_capacity(height * width);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y))
            }
        }
        Self {
            shape: Shape::new(width, height),
            data,
        }
    }

    pub fn to_vec(self) -> Vec<P> {
        self.data
    }

    /// Raw bytes of the pixel buffer
    pub fn as_bytes(&self) -> &[u8]
    where
        P: bytemuck::Pod,
    {
        bytemuck::cast_slice(&self.data)
    }
}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

impl<P> ImageMut for ImageOwned<P> {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        &mut self.data
    }
}

impl<I> Image for &I
where
    I: Image + ?Sized,
{
    type Pixel = I::Pixel;

    fn shape(&self) -> Shape {
        (*self).shape()
    }

    fn data(&self) -> &[Self::Pixel] {
        (*self).data()
    }
}

impl<I> Image for &mut I
where
    I: Image + ?Sized,
{
    type Pixel = I::Pixel;

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn data(&self) -> &[Self::Pixel] {
        (**self).data()
    }
}

impl<I> ImageMut for &mut I
where
    I: ImageMut + ?Sized,
{
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        (**self).data_mut()
    }
}
