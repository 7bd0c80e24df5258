use std::io;

use image_converter::action::cli::process_args;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if let Some(summary) = process_args(args)? {
        log::info!("程式執行完成，共轉換 {} 個檔案", summary.converted);
        println!("完成");
    }
    Ok(())
}
