use crate::refs::{ObjectReferences, RefType};
use crate::CardError;
use image::{ColorType, DynamicImage};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::{Path, PathBuf};

/// A raster image (typically the poster's avatar) destined for a card.
///
/// RGB JPEG files are embedded byte-for-byte; everything else is decoded and
/// re-compressed, with an alpha channel becoming a PDF soft mask.
pub enum ImageData {
    /// An RGB8 JPEG that the PDF can carry without re-encoding
    PassthroughJpeg(PathBuf),
    /// Any other decoded raster image
    Decoded(DynamicImage),
}

pub struct Image {
    pub data: ImageData,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk, decoding by sniffed format
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, CardError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;

        if format == image::ImageFormat::Jpeg && decoded.color() == ColorType::Rgb8 {
            Ok(Image {
                width: decoded.width(),
                height: decoded.height(),
                data: ImageData::PassthroughJpeg(path.to_owned()),
            })
        } else {
            Ok(Self::new_raster(decoded))
        }
    }

    /// Wrap an already-decoded image
    pub fn new_raster(decoded: DynamicImage) -> Image {
        Image {
            width: decoded.width(),
            height: decoded.height(),
            data: ImageData::Decoded(decoded),
        }
    }

    /// A copy downscaled so neither edge exceeds `max_edge` pixels, used by
    /// the reduced-fidelity export rung. Smaller images are left alone but
    /// lose JPEG pass-through
    pub fn thumbnail(&self, max_edge: u32) -> Result<Image, CardError> {
        let decoded = match &self.data {
            ImageData::PassthroughJpeg(path) => image::open(path)?,
            ImageData::Decoded(decoded) => decoded.clone(),
        };
        Ok(Self::new_raster(decoded.thumbnail(max_edge, max_edge)))
    }

    fn encode(&self) -> Result<EncodeOutput, CardError> {
        match &self.data {
            ImageData::PassthroughJpeg(path) => Ok(EncodeOutput {
                filter: Filter::DctDecode,
                bytes: std::fs::read(path)?,
                mask: None,
            }),
            ImageData::Decoded(decoded) => {
                use image::GenericImageView;
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = decoded.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = decoded.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                let bytes = compress_to_vec_zlib(decoded.to_rgb8().as_raw(), level);

                Ok(EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                })
            }
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), CardError> {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode()?;

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}
