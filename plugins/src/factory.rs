use approvals_core::api::{AppConfig, DeclarationSource, DeclarationsProvider};

use crate::source::FsDeclarationSource;

pub fn build_source(cfg: &AppConfig) -> Box<dyn DeclarationSource> {
    match &cfg.declarations.provider {
        DeclarationsProvider::Filesystem(fs_cfg) => {
            Box::new(FsDeclarationSource::new(&cfg.repo_root, fs_cfg))
        }
    }
}
