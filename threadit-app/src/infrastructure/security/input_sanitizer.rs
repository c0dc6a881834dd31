use threadit_errors::AppError;

const MAX_TITLE_LENGTH: usize = 300;
const MAX_BODY_LENGTH: usize = 10_000;
const MAX_COMMENT_LENGTH: usize = 2_000;
const MAX_TOPIC_LENGTH: usize = 40;
const ALLOWED_IMAGE_SCHEMES: &[&str] = &["http", "https"];

pub struct InputSanitizer;

impl InputSanitizer {
    pub fn validate_title(title: &str) -> Result<String, AppError> {
        let title = Self::strip_control(title.trim());

        if title.is_empty() {
            return Err(AppError::InvalidInput(
                "Judul tidak boleh kosong".to_string(),
            ));
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(AppError::InvalidInput("Judul terlalu panjang".to_string()));
        }

        Ok(title)
    }

    pub fn validate_body(body: &str) -> Result<String, AppError> {
        let body = Self::strip_control(body.trim());

        if body.len() > MAX_BODY_LENGTH {
            return Err(AppError::InvalidInput("Isi post terlalu panjang".to_string()));
        }

        Ok(body)
    }

    pub fn validate_comment(text: &str) -> Result<String, AppError> {
        let text = Self::strip_control(text.trim());

        if text.is_empty() {
            return Err(AppError::InvalidInput(
                "Komentar tidak boleh kosong".to_string(),
            ));
        }
        if text.len() > MAX_COMMENT_LENGTH {
            return Err(AppError::InvalidInput(
                "Komentar terlalu panjang".to_string(),
            ));
        }

        Ok(text)
    }

    /// Community topics become URL path segments, so only a conservative
    /// character set is accepted.
    pub fn validate_topic(topic: &str) -> Result<String, AppError> {
        let topic = topic.trim().to_lowercase();

        if topic.is_empty() {
            return Err(AppError::InvalidInput(
                "Nama komunitas tidak boleh kosong".to_string(),
            ));
        }
        if topic.len() > MAX_TOPIC_LENGTH {
            return Err(AppError::InvalidInput(
                "Nama komunitas terlalu panjang".to_string(),
            ));
        }
        if !topic.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(AppError::InvalidInput(
                "Nama komunitas hanya boleh huruf, angka, dan _".to_string(),
            ));
        }

        Ok(topic)
    }

    pub fn validate_image_url(url: &str) -> Result<Option<String>, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(None);
        }

        let parsed = url::Url::parse(url)
            .map_err(|_| AppError::InvalidInput("URL gambar tidak valid".to_string()))?;

        let scheme = parsed.scheme().to_lowercase();
        if !ALLOWED_IMAGE_SCHEMES.contains(&scheme.as_str()) {
            return Err(AppError::InvalidInput(
                "URL gambar harus HTTP atau HTTPS".to_string(),
            ));
        }

        if parsed.host_str().is_none() {
            return Err(AppError::InvalidInput(
                "URL gambar harus memiliki host".to_string(),
            ));
        }

        Ok(Some(parsed.to_string()))
    }

    fn strip_control(input: &str) -> String {
        input
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_title() {
        assert_eq!(
            InputSanitizer::validate_title("  Halo dunia  ").unwrap(),
            "Halo dunia"
        );
    }

    #[test]
    fn test_invalid_title() {
        assert!(InputSanitizer::validate_title("").is_err());
        assert!(InputSanitizer::validate_title("   ").is_err());
        assert!(InputSanitizer::validate_title(&"x".repeat(400)).is_err());
    }

    #[test]
    fn test_control_chars_stripped() {
        assert_eq!(
            InputSanitizer::validate_title("judul\u{0000} bersih").unwrap(),
            "judul bersih"
        );
    }

    #[test]
    fn test_topic_charset() {
        assert_eq!(InputSanitizer::validate_topic("Rustacean").unwrap(), "rustacean");
        assert!(InputSanitizer::validate_topic("nggak boleh spasi").is_err());
        assert!(InputSanitizer::validate_topic("titik.titik").is_err());
    }

    #[test]
    fn test_image_url() {
        assert_eq!(InputSanitizer::validate_image_url("").unwrap(), None);
        assert!(InputSanitizer::validate_image_url("https://example.com/a.png")
            .unwrap()
            .is_some());
        assert!(InputSanitizer::validate_image_url("ftp://example.com/a.png").is_err());
        assert!(InputSanitizer::validate_image_url("not-a-url").is_err());
    }
}
