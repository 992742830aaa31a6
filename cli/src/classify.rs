use crate::error::{CliError, Result, ResultExt};
use crate::render;
use crate::ui;
use overpass_response::{
    DefaultResponseClassifier, KnownFeatureCount, QueryReport, RawResponse, ResponseClassifier,
};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ClassifyArgs {
    pub body_file: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub features: Option<usize>,
    pub json: bool,
}

pub fn execute(args: ClassifyArgs) -> Result<()> {
    let report = build_report(&args)?;

    if !args.json {
        ui::section_header(&format!("Classification of {}", args.body_file));
    }
    render::print_report(&report, args.json)
}

fn build_report(args: &ClassifyArgs) -> Result<QueryReport> {
    let path = Path::new(&args.body_file);
    if !path.exists() {
        return Err(CliError::Other(format!(
            "Response file not found at: {}",
            path.display()
        )));
    }

    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw = RawResponse::new(body, args.status, args.content_type.as_deref());

    let classification = match args.features {
        Some(count) => {
            DefaultResponseClassifier::with_counter(KnownFeatureCount(count)).classify(&raw)
        }
        None => DefaultResponseClassifier::new().classify(&raw),
    };

    Ok(QueryReport::new(&raw, classification))
}

#[cfg(test)]
mod tests {
    use super::*;
    use overpass_response::{EmptyReason, PayloadKind};
    use tempfile::TempDir;

    fn args_for(dir: &TempDir, body: &str) -> ClassifyArgs {
        let path = dir.path().join("response.json");
        fs::write(&path, body).unwrap();
        ClassifyArgs {
            body_file: path.to_string_lossy().to_string(),
            status: 200,
            content_type: Some("application/json".to_string()),
            features: None,
            json: true,
        }
    }

    #[test]
    fn test_classify_saved_body() {
        let dir = TempDir::new().unwrap();
        let args = args_for(
            &dir,
            r#"{"elements":[{"type":"way","id":7,"nodes":[1,2]}]}"#,
        );
        let report = build_report(&args).unwrap();

        assert_eq!(report.classification.payload_kind, PayloadKind::Json);
        assert_eq!(
            report.classification.empty_reason,
            EmptyReason::NoVisibleData
        );
        assert_eq!(report.classification.stats.ways, 1);
    }

    #[test]
    fn test_known_feature_count_overrides_geometry() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(&dir, r#"{"elements":[{"type":"node","id":1}]}"#);
        args.features = Some(3);
        let report = build_report(&args).unwrap();

        assert_eq!(report.classification.renderable_features, 3);
        assert_eq!(report.classification.empty_reason, EmptyReason::None);
    }

    #[test]
    fn test_missing_body_file() {
        let args = ClassifyArgs {
            body_file: "does-not-exist.json".to_string(),
            status: 200,
            content_type: None,
            features: None,
            json: false,
        };
        let err = build_report(&args).unwrap_err();
        assert!(err.user_message().contains("does-not-exist.json"));
    }
}
