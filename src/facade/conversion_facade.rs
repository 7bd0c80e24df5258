use std::io;
use std::path::{Path, PathBuf};
use log::{debug, error, info, warn};
use crate::config::ports::{AppConfig, ConversionPort};
use crate::error::ConvertError;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{BatchSummary, ConversionInput};
use crate::models::file::{file_name_of, Entry, ImageFile};
use crate::service::image::ImageService;
use crate::service::reference::ReferenceService;
use crate::service::traits::i_service::{ImageServiceTrait, ReferenceServiceTrait};
use crate::utils::file::{classify_entry, list_directory};
use crate::utils::utils::{format_file_size, format_saved, ProgressManager};

pub struct ConversionFacade {
    image_service: Box<dyn ImageServiceTrait>,
    reference_service: Box<dyn ReferenceServiceTrait>,
}

impl ConversionFacade {
    pub fn new(
        image_service: Box<dyn ImageServiceTrait>,
        reference_service: Box<dyn ReferenceServiceTrait>,
    ) -> Self {
        ConversionFacade {
            image_service,
            reference_service,
        }
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, input: ConversionInput) -> io::Result<BatchSummary> {
        if !input.input_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("輸入路徑 '{}' 不存在", input.input_path.display())
            ));
        }

        info!("開始將圖片轉換為 {} 格式...", input.target_format);
        let progress = ProgressManager::new(input.no_progress);
        let summary = self.process_path(&input.input_path, &input, &progress);
        progress.finish(&summary);
        Ok(summary)
    }
}

impl ConversionFacade {
    /// 處理單一路徑；目錄會遞迴處理，並合併子項目的統計
    pub fn process_path(&self, path: &Path, input: &ConversionInput, progress: &ProgressManager) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let entry = match classify_entry(path, input.target_format) {
            Ok(entry) => entry,
            Err(e) => {
                error!("無法讀取 {}：{}", path.display(), e);
                summary.failed += 1;
                return summary;
            }
        };

        match entry {
            Entry::Directory(dir) => match list_directory(&dir) {
                Ok(children) => {
                    for child in children {
                        summary.merge(self.process_path(&child, input, progress));
                    }
                }
                Err(e) => {
                    error!("無法讀取目錄 {}：{}", dir.display(), e);
                    summary.failed += 1;
                }
            },
            Entry::AlreadyTarget(file) => {
                debug!("{} 已是 {} 格式，略過", file.display(), input.target_format);
                summary.skipped += 1;
                progress.update(&file_name_of(&file));
            }
            Entry::UnsupportedFile(file) => {
                progress.suspend(|| warn!("略過 {}，不是支援的圖片格式", file_name_of(&file)));
                summary.unsupported += 1;
                progress.update(&file_name_of(&file));
            }
            Entry::RegularImageFile(image) => {
                summary.merge(progress.suspend(|| self.process_image(&image, input)));
                progress.update(&image.file_name());
            }
        }
        summary
    }

    fn process_image(&self, image: &ImageFile, input: &ConversionInput) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let file_name = image.file_name();
        info!("正在將 {} 轉換為 {} 格式...", file_name, input.target_format);

        let result = match self.image_service.convert(image, input.target_format, input.jpeg_quality) {
            Ok(result) => result,
            Err(e) => {
                error!("> 轉換失敗：{}", e);
                summary.failed += 1;
                return summary;
            }
        };
        info!("> 轉換成功！");
        info!("> 轉換前大小：{}", format_file_size(result.original_size));
        info!("> 轉換後大小：{}", format_file_size(result.converted_size));
        info!("> 節省空間：{}", format_saved(result.saved_percentage()));
        summary.record_conversion(&result);

        // 只有在新檔案成功寫入後才刪除原始檔案
        if input.delete_original {
            info!("> 刪除 {}", file_name);
            match std::fs::remove_file(&image.path) {
                Ok(()) => summary.deleted += 1,
                Err(source) => {
                    let e = ConvertError::Delete { path: image.path.clone(), source };
                    error!("> {}", e);
                    summary.delete_failures += 1;
                }
            }
        }

        if let Some(source_code_dir) = &input.source_code_dir {
            let new_name = file_name_of(&result.destination);
            info!("> 將 {} 的引用替換為 {}", file_name, new_name);
            match self.reference_service.rewrite_references(&file_name, &new_name, source_code_dir) {
                Ok(edits) => {
                    summary.edited_files += edits.len();
                    summary.replacements += edits.iter().map(|edit| edit.replacements).sum::<usize>();
                    info!("> 替換完成");
                }
                Err(e) => warn!("> 替換 {} 的引用失敗：{}", file_name, e),
            }
        }
        summary
    }
}

// 轉換執行的適配器，依配置組裝 Facade
pub struct ConversionAdapter;

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> io::Result<BatchSummary> {
        let facade = ConversionFacade::new(
            Box::new(ImageService::new()),
            Box::new(ReferenceService::new(config.text_extensions.clone())),
        );
        let input = ConversionInput {
            input_path: PathBuf::from(&config.input),
            target_format: config.target_format,
            delete_original: config.delete_original,
            source_code_dir: config.source_code_dir.as_ref().map(PathBuf::from),
            jpeg_quality: config.jpeg_quality,
            no_progress: config.no_progress,
        };
        facade.execute_conversion(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::default_text_extensions;
    use crate::models::conversion::ConversionResult;
    use crate::models::format::TargetFormat;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::tempdir;

    fn facade() -> ConversionFacade {
        ConversionFacade::new(
            Box::new(ImageService::new()),
            Box::new(ReferenceService::new(default_text_extensions())),
        )
    }

    fn input(path: &Path, delete_original: bool, source_code_dir: Option<&Path>) -> ConversionInput {
        ConversionInput {
            input_path: path.to_path_buf(),
            target_format: TargetFormat::Webp,
            delete_original,
            source_code_dir: source_code_dir.map(Path::to_path_buf),
            jpeg_quality: 90,
            no_progress: true,
        }
    }

    fn write_png(path: &Path) {
        RgbImage::from_pixel(6, 6, Rgb([12, 34, 56])).save(path).unwrap();
    }

    #[test]
    fn single_file_keeps_original_by_default() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("a.png");
        write_png(&png);

        let summary = facade().execute_conversion(input(&png, false, None)).unwrap();

        assert_eq!(summary.converted, 1);
        assert!(png.exists());
        assert!(dir.path().join("a.webp").exists());
    }

    #[test]
    fn every_source_extension_converts() {
        let dir = tempdir().unwrap();
        for name in ["a.png", "b.jpg", "c.jpeg"] {
            RgbImage::from_pixel(4, 4, Rgb([200, 100, 50])).save(dir.path().join(name)).unwrap();
        }

        let summary = facade().execute_conversion(input(dir.path(), false, None)).unwrap();

        assert_eq!(summary.converted, 3);
        for name in ["a.webp", "b.webp", "c.webp", "a.png", "b.jpg", "c.jpeg"] {
            assert!(dir.path().join(name).exists(), "{} missing", name);
        }
    }

    #[test]
    fn already_converted_file_is_a_no_op() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("a.png");
        write_png(&png);
        facade().execute_conversion(input(&png, true, None)).unwrap();
        let webp = dir.path().join("a.webp");
        let before = fs::read(&webp).unwrap();

        let summary = facade().execute_conversion(input(&webp, false, None)).unwrap();

        assert_eq!(summary, BatchSummary { skipped: 1, ..BatchSummary::default() });
        assert_eq!(fs::read(&webp).unwrap(), before);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unsupported_files_are_counted_and_left_alone() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("anim.gif"), "GIF89a").unwrap();

        let summary = facade().execute_conversion(input(dir.path(), true, None)).unwrap();

        assert_eq!(summary.unsupported, 2);
        assert_eq!(summary.converted, 0);
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("anim.gif").exists());
    }

    #[test]
    fn failed_write_keeps_original() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("a.png");
        write_png(&png);
        fs::create_dir(dir.path().join("a.webp")).unwrap();

        let summary = facade().execute_conversion(input(&png, true, None)).unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.deleted, 0);
        assert!(png.exists());
    }

    #[test]
    fn corrupt_image_does_not_stop_the_batch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.png"), b"garbage").unwrap();
        write_png(&dir.path().join("good.png"));

        let summary = facade().execute_conversion(input(dir.path(), true, None)).unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.deleted, 1);
        assert!(dir.path().join("broken.png").exists());
        assert!(!dir.path().join("broken.webp").exists());
        assert!(dir.path().join("good.webp").exists());
        assert!(!dir.path().join("good.png").exists());
    }

    #[test]
    fn nested_directories_are_converted_and_rewritten() {
        let dir = tempdir().unwrap();
        let images = dir.path().join("public/img/icons");
        let src = dir.path().join("src");
        fs::create_dir_all(&images).unwrap();
        fs::create_dir_all(&src).unwrap();
        write_png(&images.join("icon.png"));
        write_png(&images.join("bigicon.png"));
        fs::write(
            src.join("app.css"),
            ".a { background: url(../public/img/icons/icon.png); }\n.b { background: url(bigicon.png); }\n",
        )
        .unwrap();

        let summary = facade()
            .execute_conversion(input(&dir.path().join("public"), true, Some(&src)))
            .unwrap();

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.edited_files, 2);
        assert_eq!(summary.replacements, 2);
        assert!(images.join("icon.webp").exists());
        assert!(images.join("bigicon.webp").exists());
        assert_eq!(
            fs::read_to_string(src.join("app.css")).unwrap(),
            ".a { background: url(../public/img/icons/icon.webp); }\n.b { background: url(bigicon.webp); }\n"
        );
    }

    // 轉換後把指定的原始檔移走，使後續的刪除步驟失敗
    struct MovesOriginalAway {
        inner: ImageService,
        name: &'static str,
    }

    impl ImageServiceTrait for MovesOriginalAway {
        fn convert(
            &self,
            image: &ImageFile,
            target: TargetFormat,
            jpeg_quality: u8,
        ) -> Result<ConversionResult, ConvertError> {
            let result = self.inner.convert(image, target, jpeg_quality)?;
            if image.file_name() == self.name {
                fs::rename(&image.path, image.path.with_extension("moved")).unwrap();
            }
            Ok(result)
        }
    }

    #[test]
    fn failed_delete_still_counts_conversion_and_rewrites() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("locked.png"));
        write_png(&dir.path().join("other.png"));
        fs::write(dir.path().join("notes.txt"), "locked.png other.png\n").unwrap();
        let facade = ConversionFacade::new(
            Box::new(MovesOriginalAway { inner: ImageService::new(), name: "locked.png" }),
            Box::new(ReferenceService::new(default_text_extensions())),
        );

        let summary = facade
            .execute_conversion(input(dir.path(), true, Some(dir.path())))
            .unwrap();

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.deleted, 1);
        assert_eq!(summary.delete_failures, 1);
        assert_eq!(summary.edited_files, 2);
        assert!(dir.path().join("locked.webp").exists());
        assert!(dir.path().join("other.webp").exists());
        assert!(!dir.path().join("other.png").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "locked.webp other.webp\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlink_loop_converts_each_image_once() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("a.png"));
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let summary = facade().execute_conversion(input(dir.path(), false, None)).unwrap();

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failed, 0);
        assert!(dir.path().join("a.webp").exists());
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let err = facade()
            .execute_conversion(input(&dir.path().join("missing"), false, None))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn adapter_builds_facade_from_config() {
        let dir = tempdir().unwrap();
        RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])).save(dir.path().join("p.png")).unwrap();
        let config = AppConfig {
            input: dir.path().to_string_lossy().to_string(),
            target_format: TargetFormat::Jpeg,
            delete_original: false,
            source_code_dir: None,
            text_extensions: default_text_extensions(),
            jpeg_quality: 80,
            no_confirm: true,
            no_progress: true,
        };

        let summary = ConversionAdapter.execute(config).unwrap();

        assert_eq!(summary.converted, 1);
        assert!(dir.path().join("p.jpg").exists());
    }
}
