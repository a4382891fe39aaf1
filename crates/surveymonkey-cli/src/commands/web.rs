use std::path::Path;

use anyhow::{Context, Result};
use surveymonkey_core::{ServiceConfig, SurveyService};

pub(super) fn serve(root: &Path, config: ServiceConfig) -> Result<()> {
    let host = config.host.clone();
    let port = config.port;
    let service = SurveyService::open(root, config)
        .with_context(|| format!("failed to open survey store under {}", root.display()))?;
    surveymonkey_web::serve_web(service, &host, port)
}
