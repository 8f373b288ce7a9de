//! 選択ファイルの検証

use crate::error::ValidationError;

/// 対応拡張子（小文字、ドット付き）
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// ファイル選択ダイアログのacceptヒント。検証の代わりにはならない
pub const ACCEPT_FILTER: &str = "image/jpeg,image/jpg,image/png";

/// 最後のドット以降を小文字で返す（ドット込み）
pub fn file_extension(name: &str) -> Option<String> {
    name.rfind('.').map(|idx| name[idx..].to_lowercase())
}

/// MIMEタイプと拡張子の両方を検証
///
/// MIMEが`image/`で始まらなければ`NotAnImage`、拡張子が対応外なら
/// `UnsupportedExtension`。MIMEと拡張子の不一致は拡張子側で弾く。
pub fn validate_image(name: &str, mime_type: &str) -> Result<(), ValidationError> {
    if !mime_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }

    match file_extension(name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::UnsupportedExtension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("photo.JPG").as_deref(), Some(".jpg"));
        assert_eq!(file_extension("archive.tar.png").as_deref(), Some(".png"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing.").as_deref(), Some("."));
    }

    #[test]
    fn test_accepts_jpeg_and_png() {
        assert!(validate_image("a.jpg", "image/jpeg").is_ok());
        assert!(validate_image("a.JPEG", "image/jpeg").is_ok());
        assert!(validate_image("a.Png", "image/png").is_ok());
    }

    #[test]
    fn test_rejects_non_image_mime() {
        for mime in ["text/plain", "application/pdf", "", "video/png"] {
            assert_eq!(
                validate_image("a.png", mime),
                Err(ValidationError::NotAnImage),
                "mime: {mime}"
            );
        }
    }

    #[test]
    fn test_rejects_other_image_extensions() {
        for name in ["a.gif", "a.webp", "a.bmp", "a", "a.png.txt", "jpg"] {
            assert_eq!(
                validate_image(name, "image/png"),
                Err(ValidationError::UnsupportedExtension),
                "name: {name}"
            );
        }
    }

    #[test]
    fn test_mime_checked_before_extension() {
        assert_eq!(
            validate_image("a.gif", "text/plain"),
            Err(ValidationError::NotAnImage)
        );
    }

    #[test]
    fn test_mismatched_mime_and_extension_is_allowed_by_mime_check() {
        // image/gifでも拡張子が.pngなら通る（拡張子が判定基準）
        assert!(validate_image("a.png", "image/gif").is_ok());
        assert!(validate_image("a.gif", "image/png").is_err());
    }
}
