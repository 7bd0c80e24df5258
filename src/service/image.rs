use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageReader, ImageResult, Rgb, RgbImage};
use log::debug;
use tempfile::NamedTempFile;
use crate::error::ConvertError;
use crate::models::conversion::ConversionResult;
use crate::models::file::ImageFile;
use crate::models::format::TargetFormat;
use crate::service::traits::i_service::ImageServiceTrait;

pub struct ImageService;

impl ImageService {
    pub fn new() -> Self {
        ImageService
    }
}

impl Default for ImageService {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageServiceTrait for ImageService {
    fn convert(
        &self,
        image: &ImageFile,
        target: TargetFormat,
        jpeg_quality: u8,
    ) -> Result<ConversionResult, ConvertError> {
        let destination = image.converted_path(target);
        let decoded = decode_image(&image.path)?;
        debug!("解碼 {}（{:?}）：{}x{}，色彩類型 {:?}", image.path.display(), image.format, decoded.width(), decoded.height(), decoded.color());

        // 先寫入同目錄的暫存檔，成功後再改名覆蓋目標
        let parent = destination
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let write_err = |source: io::Error| ConvertError::Write { path: destination.clone(), source };
        let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            encode_image(&decoded, target, jpeg_quality, &mut writer)
                .map_err(|source| ConvertError::Encode { path: image.path.clone(), source })?;
            writer.flush().map_err(write_err)?;
        }
        if let Ok(metadata) = fs::metadata(&image.path) {
            fs::set_permissions(temp.path(), metadata.permissions()).map_err(write_err)?;
        }
        temp.persist(&destination).map_err(|e| write_err(e.error))?;

        let converted_size = fs::metadata(&destination).map_err(write_err)?.len();
        Ok(ConversionResult {
            origin: image.path.clone(),
            destination,
            original_size: image.size,
            converted_size,
        })
    }
}

pub fn decode_image(path: &Path) -> Result<DynamicImage, ConvertError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| ConvertError::Read { path: path.to_path_buf(), source })?;
    reader
        .decode()
        .map_err(|source| ConvertError::Decode { path: path.to_path_buf(), source })
}

pub fn encode_image<W: Write>(
    img: &DynamicImage,
    target: TargetFormat,
    jpeg_quality: u8,
    writer: W,
) -> ImageResult<()> {
    match target {
        // WebP 編碼器只接受 8 位元
        TargetFormat::Webp => {
            let normalized = if img.color().has_alpha() {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            };
            normalized.write_with_encoder(WebPEncoder::new_lossless(writer))
        }
        TargetFormat::Jpeg => {
            let flattened = DynamicImage::ImageRgb8(flatten_onto_white(img));
            flattened.write_with_encoder(JpegEncoder::new_with_quality(writer, jpeg_quality))
        }
        TargetFormat::Png => img.write_with_encoder(PngEncoder::new(writer)),
    }
}

/// 將帶透明度的圖片合成到白色背景上，無透明度時直接轉為 RGB
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    let mut flattened = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        flattened.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    flattened
}
