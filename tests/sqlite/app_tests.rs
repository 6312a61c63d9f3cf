//! Composition root tests.

use camino::Utf8PathBuf;
use maintlog::app::Maintlog;
use maintlog::config::MaintlogConfig;

fn config_in(dir: &tempfile::TempDir) -> eyre::Result<MaintlogConfig> {
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .map_err(|path| eyre::eyre!("non UTF-8 path {}", path.display()))?;
    Ok(MaintlogConfig {
        database_url: root.join("maintlog.sqlite3").into_string(),
        upload_dir: root.join("uploads"),
        base_url: "https://line.example/".to_owned(),
        seed_on_startup: true,
        ..MaintlogConfig::default()
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn open_seeds_and_renders_scan_targets() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_in(&dir)?;

    let app = Maintlog::open(&config).await?;
    let targets = app.provisioning.scan_targets(&config.base_url).await?;

    assert_eq!(targets.len(), 9);
    assert!(
        targets
            .iter()
            .any(|target| target.url == "https://line.example/DUMPER")
    );
    assert!(config.upload_dir.is_dir());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_is_idempotent() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_in(&dir)?;

    Maintlog::open(&config).await?;
    let app = Maintlog::open(&config).await?;

    assert_eq!(app.catalog.list_sections().await?.len(), 9);
    Ok(())
}
