// brewup-core/src/ensure.rs
use brewup_common::error::{BrewupError, Result};
use brewup_common::model::{EnsureOutcome, PackageRequest};
use tracing::{debug, info, warn};

use crate::brew::Brew;
use crate::process::CommandRunner;

/// Keg relinked with `--overwrite` when a fresh install fails on file
/// conflicts. Older CI images carry a `gcc49` keg whose files collide with
/// newer formulas; the fallback only ever targets that keg.
pub const CONFLICT_RELINK_PACKAGE: &str = "gcc49";

/// Installs `request`, or upgrades it if already installed and outdated.
///
/// Fails only when every attempted path failed. Callers must not rely on
/// which path was taken.
pub async fn ensure_installed<R: CommandRunner>(
    brew: &Brew<'_, R>,
    request: &PackageRequest,
) -> Result<EnsureOutcome> {
    let name = request.name.as_str();

    if brew.is_installed(name).await? {
        let status = brew.outdated(name).await?;
        if !status.needs_upgrade() {
            debug!("'{}' is installed and up to date", name);
            return Ok(EnsureOutcome::UpToDate);
        }
        info!("Upgrading '{}' ({:?})", name, status);
        brew.upgrade(request).await?;
        return Ok(EnsureOutcome::Upgraded);
    }

    info!("Installing '{}'", name);
    let install = brew.install(request).await?;
    if install.succeeded() {
        return Ok(EnsureOutcome::Installed);
    }

    warn!(
        "Installing '{}' failed (exit {:?}); relinking '{}' with --overwrite",
        name, install.code, CONFLICT_RELINK_PACKAGE
    );
    let relink = brew.link_overwrite(CONFLICT_RELINK_PACKAGE).await?;
    if relink.succeeded() {
        Ok(EnsureOutcome::Relinked)
    } else {
        Err(BrewupError::FallbackExhausted {
            package: name.to_string(),
            code: relink.code,
        })
    }
}
