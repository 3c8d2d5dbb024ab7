//! Loads [`Region`] data from the filesystem or from an in-memory buffer.
//!
//! The on-disk lookup follows the conventions `tzset(3)` and the `zoneinfo`
//! tree use: a `TZDIR` root (`/usr/share/zoneinfo` unless overridden)
//! containing one TZif file per region name (`America/New_York`,
//! `Europe/Berlin`, ...), plus `/etc/localtime` for the system's own zone.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::TzError;
use crate::region::Region;

const DEFAULT_TZDIR: &str = "/usr/share/zoneinfo";

fn tzdir() -> PathBuf {
    std::env::var_os("TZDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TZDIR))
}

/// The UTC sentinel region: fixed zero offset, no explicit history, no DST.
fn utc_region() -> Region {
    Region::from_posix_tz("UTC0", "UTC").expect("\"UTC0\" is a valid POSIX TZ string")
}

/// Loads a named region, e.g. `"America/New_York"`, from the system
/// `zoneinfo` tree (or `$TZDIR`, if set). `"UTC"` is recognized directly,
/// without touching the filesystem.
pub fn load_by_name(name: &str) -> Result<Region, TzError> {
    if name == "UTC" {
        return Ok(utc_region());
    }
    let path = tzdir().join(name);
    load_from_file(&path, name)
}

/// Loads a TZif file from an arbitrary path.
pub fn load_from_file(path: &Path, name: &str) -> Result<Region, TzError> {
    let bytes = fs::read(path).map_err(|e| TzError::IoError(e.to_string()))?;
    load_from_buffer(&bytes, name)
}

/// Decodes an already-read TZif buffer into a named [`Region`].
pub fn load_from_buffer(bytes: &[u8], name: &str) -> Result<Region, TzError> {
    Region::from_tzif(bytes, name)
}

/// Loads the system's local time zone.
///
/// When `check_env` is true, the `TZ` environment variable takes priority:
/// if set, its value is looked up as a region name via [`load_by_name`] (so
/// `TZ=UTC` and `TZ=America/New_York` both work without reading
/// `/etc/localtime`). Otherwise, or when `check_env` is false, this reads
/// `/etc/localtime` on Unix, which is conventionally a symlink into the
/// `zoneinfo` tree (or a copy of the target file). With the `local-tz`
/// feature enabled, the region name is additionally resolved via
/// [`iana_time_zone`] so [`Region::name`](crate::region::Region::name)
/// reports something human-readable instead of the `"UTC"` fallback.
#[cfg(unix)]
pub fn load_local(check_env: bool) -> Result<Region, TzError> {
    if check_env {
        if let Ok(tz) = std::env::var("TZ") {
            return load_by_name(&tz);
        }
    }
    let name = resolve_local_name(false);
    if name == "UTC" {
        return Ok(utc_region());
    }
    load_from_file(Path::new("/etc/localtime"), &name)
}

/// Loads the system's local time zone. Non-Unix platforms have no
/// `/etc/localtime` convention, so absent a `TZ` override this always fails
/// with [`TzError::RegionNotFound`].
#[cfg(not(unix))]
pub fn load_local(check_env: bool) -> Result<Region, TzError> {
    if check_env {
        if let Ok(tz) = std::env::var("TZ") {
            return load_by_name(&tz);
        }
    }
    Err(TzError::RegionNotFound(resolve_local_name(check_env)))
}

/// Best-effort name for the system's local time zone, e.g. `"Europe/Berlin"`.
///
/// When `check_env` is true, the `TZ` environment variable is consulted
/// first; otherwise it is ignored entirely. Falls back to `"UTC"` when the
/// name cannot be determined any other way.
pub fn resolve_local_name(check_env: bool) -> String {
    if check_env {
        if let Ok(tz) = std::env::var("TZ") {
            return tz;
        }
    }
    #[cfg(feature = "local-tz")]
    {
        if let Ok(name) = iana_time_zone::get_timezone() {
            return name;
        }
    }
    "UTC".to_owned()
}
