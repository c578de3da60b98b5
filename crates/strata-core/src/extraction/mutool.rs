use crate::config::ExtractConfig;
use crate::error::StrataError;
use crate::extraction::stext::parse_stext;
use crate::extraction::PageSource;
use crate::model::Page;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variable naming an explicit `mutool` binary.
pub const MUPDF_BIN_ENV: &str = "MUPDF_BIN";

/// Oldest release known to produce `stext.json`.
const RECOMMENDED_VERSION: (u32, u32) = (1, 21);

/// Page source backed by MuPDF's `mutool` command line tool.
///
/// Uses `mutool draw -F stext.json` for the structured model and
/// `mutool info` for page counts. Build one per process with
/// [`MutoolSource::discover`] and pass it to the extraction functions.
#[derive(Debug, Clone)]
pub struct MutoolSource {
    bin: PathBuf,
    version: Option<String>,
}

impl MutoolSource {
    /// Locate `mutool`: the config override, then `$MUPDF_BIN`, then `PATH`.
    pub fn discover(config: &ExtractConfig) -> Result<Self, StrataError> {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(ref bin) = config.mutool {
            candidates.push(bin.clone());
        }
        if let Ok(env) = std::env::var(MUPDF_BIN_ENV) {
            let env = env.trim();
            if !env.is_empty() {
                candidates.push(PathBuf::from(env));
            }
        }
        candidates.push(PathBuf::from(format!("mutool{}", std::env::consts::EXE_SUFFIX)));

        let bin = candidates
            .iter()
            .find_map(|c| resolve_binary(c))
            .ok_or_else(|| StrataError::AdapterUnavailable("mutool not found".into()))?;
        Self::with_binary(bin)
    }

    /// Use a specific binary, checking its version.
    pub fn with_binary(bin: impl Into<PathBuf>) -> Result<Self, StrataError> {
        let bin = bin.into();
        let version = check_version(&bin)?;
        log::debug!(
            "using mutool at {} (version {})",
            bin.display(),
            version.as_deref().unwrap_or("unknown")
        );
        Ok(MutoolSource { bin, version })
    }

    /// Check if mutool can be found without a config override.
    pub fn is_available() -> bool {
        Self::discover(&ExtractConfig::default()).is_ok()
    }

    pub fn binary(&self) -> &Path {
        &self.bin
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn run<I, S>(&self, args: I) -> Result<Output, StrataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        log::debug!(
            "running {} {}",
            self.bin.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.bin).args(&args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StrataError::AdapterUnavailable(format!("{}: {e}", self.bin.display()))
            } else {
                StrataError::Io(e)
            }
        })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(StrataError::RendererFailed { code, stderr });
        }
        Ok(output)
    }
}

impl PageSource for MutoolSource {
    fn page_count(&self, path: &Path) -> Result<usize, StrataError> {
        let output = self
            .run([OsStr::new("info"), path.as_os_str()])
            .map_err(|e| match e {
                StrataError::AdapterUnavailable(_) => e,
                other => StrataError::PageCountUnavailable(other.to_string()),
            })?;
        parse_page_count(&String::from_utf8_lossy(&output.stdout))
    }

    fn decode_pages(
        &self,
        path: &Path,
        from: usize,
        to: usize,
    ) -> Result<Vec<Page>, StrataError> {
        let range = format!("{from}-{to}");
        let output = self.run([
            OsStr::new("draw"),
            OsStr::new("-q"),
            OsStr::new("-F"),
            OsStr::new("stext.json"),
            OsStr::new("-o"),
            OsStr::new("-"),
            path.as_os_str(),
            OsStr::new(&range),
        ])?;

        let pages = parse_stext(&String::from_utf8_lossy(&output.stdout))?;
        let expected = to + 1 - from;
        if pages.len() != expected {
            return Err(StrataError::MalformedStext(format!(
                "expected {expected} page(s), got {}",
                pages.len()
            )));
        }
        Ok(pages)
    }

    fn extract_text(&self, path: &Path, pages: &[usize]) -> Result<String, StrataError> {
        let mut args: Vec<OsString> = ["draw", "-q", "-F", "txt", "-o", "-"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(path.as_os_str().to_owned());
        if !pages.is_empty() {
            args.push(OsString::from(page_spec(pages)));
        }
        let output = self.run(&args)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn backend_name(&self) -> &str {
        "mutool"
    }
}

/// Resolve a candidate to an existing file. Bare names are looked up on `PATH`.
fn resolve_binary(candidate: &Path) -> Option<PathBuf> {
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(candidate))
        .find(|p| p.is_file())
}

fn check_version(bin: &Path) -> Result<Option<String>, StrataError> {
    // `mutool -v` prints its banner to stderr and may exit non-zero.
    let output = Command::new(bin).arg("-v").output().map_err(|e| {
        StrataError::AdapterUnavailable(format!("{}: {e}", bin.display()))
    })?;
    let banner = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let Some(version) = parse_version(&banner) else {
        log::debug!("could not read mutool version from {:?}", banner.trim());
        return Ok(None);
    };
    let (major, minor) = version_tuple(&version).unwrap_or((0, 0));
    if major < 1 {
        return Err(StrataError::AdapterUnavailable(format!(
            "MuPDF version too old ({version})"
        )));
    }
    if (major, minor) < RECOMMENDED_VERSION {
        log::warn!(
            "mutool {version} is older than {}.{}; stext.json output may be incomplete",
            RECOMMENDED_VERSION.0,
            RECOMMENDED_VERSION.1
        );
    }
    Ok(Some(version))
}

/// Extract the version token following `version` in a `mutool -v` banner.
fn parse_version(banner: &str) -> Option<String> {
    let mut words = banner.split_whitespace();
    words.find(|w| w.eq_ignore_ascii_case("version"))?;
    let token = words.next()?.trim_start_matches(['v', 'V']);
    token
        .chars()
        .next()
        .filter(char::is_ascii_digit)
        .map(|_| token.to_string())
}

fn version_tuple(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()
        .and_then(|m| {
            m.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse()
                .ok()
        })
        .unwrap_or(0);
    Some((major, minor))
}

/// Find the `Pages: N` line of `mutool info` output.
fn parse_page_count(info: &str) -> Result<usize, StrataError> {
    info.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("Pages:"))
        .ok_or_else(|| {
            StrataError::PageCountUnavailable("page count not found in mutool info output".into())
        })?
        .trim()
        .parse()
        .map_err(|e| StrataError::PageCountUnavailable(format!("invalid page count: {e}")))
}

fn page_spec(pages: &[usize]) -> String {
    pages
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
