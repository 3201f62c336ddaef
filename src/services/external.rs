use crate::error::{BatesError, Result};
use crate::types::BatesRange;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Looks up how many pages a PDF actually has.
#[async_trait]
pub trait PageCounter: Send + Sync {
    async fn page_count(&self, document: &Path) -> Result<u64>;
}

/// Concatenates source PDFs into one output, in order.
#[async_trait]
pub trait Uniter: Send + Sync {
    async fn unite(&self, output: &Path, sources: &[PathBuf]) -> Result<()>;
}

/// Cross-checks a source file's real page count against the span its
/// bates range claims.
pub async fn verify_page_count(
    counter: &dyn PageCounter,
    document: &Path,
    range: &BatesRange,
) -> Result<()> {
    let expected = range.page_count();
    let actual = counter.page_count(document).await?;

    if actual != expected {
        return Err(BatesError::PageCountMismatch {
            path: document.display().to_string(),
            expected,
            actual,
        });
    }

    debug!("{} has the expected {} pages", document.display(), expected);
    Ok(())
}

/// `pdfinfo`-backed page counter.
pub struct PdfInfoPageCounter;

#[async_trait]
impl PageCounter for PdfInfoPageCounter {
    async fn page_count(&self, document: &Path) -> Result<u64> {
        let output = Command::new("pdfinfo").arg(document).output().await?;

        if !output.status.success() {
            return Err(BatesError::ExternalTool {
                tool: "pdfinfo".to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .find_map(|line| line.strip_prefix("Pages:"))
            .and_then(|rest| rest.trim().parse::<u64>().ok())
            .ok_or_else(|| BatesError::ExternalTool {
                tool: "pdfinfo".to_string(),
                detail: format!("no page count in output for {}", document.display()),
            })
    }
}

/// `pdfunite`-backed concatenator.
pub struct PdfUniteUniter;

#[async_trait]
impl Uniter for PdfUniteUniter {
    async fn unite(&self, output: &Path, sources: &[PathBuf]) -> Result<()> {
        info!(
            "uniting {} files into {}",
            sources.len(),
            output.display()
        );

        let result = Command::new("pdfunite")
            .args(sources)
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(BatesError::ExternalTool {
                tool: "pdfunite".to_string(),
                detail: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RangeParser;

    struct FixedPageCounter(u64);

    #[async_trait]
    impl PageCounter for FixedPageCounter {
        async fn page_count(&self, _document: &Path) -> Result<u64> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn matching_page_count_passes() {
        let range = RangeParser::new().parse_range("OCA 1-50").unwrap();
        verify_page_count(&FixedPageCounter(50), Path::new("OCA 1-50.pdf"), &range)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn mismatched_page_count_is_surfaced() {
        let range = RangeParser::new().parse_range("OCA 1-50").unwrap();
        let err = verify_page_count(&FixedPageCounter(49), Path::new("OCA 1-50.pdf"), &range)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BatesError::PageCountMismatch {
                expected: 50,
                actual: 49,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn single_page_file_expects_one_page() {
        let range = RangeParser::new().parse_range("PITCHESS 51-51").unwrap();
        verify_page_count(&FixedPageCounter(1), Path::new("PITCHESS 51-51.pdf"), &range)
            .await
            .unwrap();
    }
}
