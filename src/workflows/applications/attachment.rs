use mime::Mime;

use super::domain::{FileDescriptor, ResumeAttachment};

/// Hard cap on resume uploads: 2 MiB.
pub const MAX_RESUME_BYTES: usize = 2 * 1024 * 1024;

/// Declared MIME types accepted for resume uploads.
pub const ALLOWED_RESUME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("resume must be a PNG, JPEG, or WEBP image (got '{found}')")]
    UnsupportedType { found: String },
    #[error("resume must be 2 MB or smaller ({size} bytes)")]
    TooLarge { size: usize },
}

/// Validate a resume upload against its declared metadata.
///
/// The declared content type is trusted as-is; no magic-byte sniffing is
/// performed. Runs at the trust boundary on every submission; any edge-side
/// check (file picker, drop handler) applies the same rules advisorily.
pub fn validate(descriptor: &FileDescriptor) -> Result<ResumeAttachment, AttachmentError> {
    let declared = descriptor.content_type.parse::<Mime>().ok();
    let essence = declared.as_ref().map(Mime::essence_str);

    let Some(essence) = essence.filter(|essence| ALLOWED_RESUME_TYPES.contains(essence)) else {
        return Err(AttachmentError::UnsupportedType {
            found: descriptor.content_type.clone(),
        });
    };

    if descriptor.size > MAX_RESUME_BYTES {
        return Err(AttachmentError::TooLarge {
            size: descriptor.size,
        });
    }

    Ok(ResumeAttachment {
        file_name: descriptor.file_name.clone(),
        content_type: essence.to_string(),
        size: descriptor.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(content_type: &str, size: usize) -> FileDescriptor {
        FileDescriptor {
            file_name: "resume.png".to_string(),
            content_type: content_type.to_string(),
            size,
        }
    }

    #[test]
    fn accepts_each_allowed_type_at_the_cap() {
        for content_type in ALLOWED_RESUME_TYPES {
            let accepted = validate(&descriptor(content_type, MAX_RESUME_BYTES))
                .expect("allowed type at cap validates");
            assert_eq!(accepted.content_type, content_type);
            assert_eq!(accepted.size, MAX_RESUME_BYTES);
        }
    }

    #[test]
    fn rejects_disallowed_type_regardless_of_size() {
        for size in [0, 1, 100_000, MAX_RESUME_BYTES * 4] {
            match validate(&descriptor("application/pdf", size)) {
                Err(AttachmentError::UnsupportedType { found }) => {
                    assert_eq!(found, "application/pdf");
                }
                other => panic!("expected UnsupportedType, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_unparseable_content_type() {
        assert!(matches!(
            validate(&descriptor("not a mime", 10)),
            Err(AttachmentError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn rejects_oversized_file_of_allowed_type() {
        match validate(&descriptor("image/png", MAX_RESUME_BYTES + 1)) {
            Err(AttachmentError::TooLarge { size }) => assert_eq!(size, MAX_RESUME_BYTES + 1),
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn content_type_parameters_are_stripped() {
        let accepted = validate(&descriptor("image/jpeg; charset=binary", 1_000))
            .expect("parameterized type validates");
        assert_eq!(accepted.content_type, "image/jpeg");
    }
}
