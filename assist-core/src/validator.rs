//! Input validation pipeline for code submissions.
//!
//! Checks run in a fixed order; each appends at most one warning or sets a
//! blocking reason. A blocking reason short-circuits the remaining checks
//! but keeps the warnings collected so far. The advisory scans (danger
//! patterns, long lines, repetition, syntax) never block and only run under
//! [`ValidationProfile::Strict`].

use tracing::debug;

use crate::limits::{Limits, ValidationProfile};
use crate::patterns::scan_danger_patterns;
use crate::submission::{CodeSubmission, SubmissionOrigin};
use crate::syntax::python_syntax_diagnostic;
use crate::verdict::ValidationVerdict;

/// How many offending line numbers the upload long-line warning cites.
const LONG_LINE_REPORT_CAP: usize = 5;

/// Coarse characters-to-tokens estimate: `floor((|code| + |instruction|) / 3)`.
///
/// Intentionally crude; it only needs to be monotonic in input length and
/// conservative enough to keep submissions inside the model's context window.
pub fn estimate_tokens(code: &str, instruction: &str) -> usize {
    (code.chars().count() + instruction.chars().count()) / 3
}

/// Validates raw submissions against [`Limits`] before any model call.
#[derive(Debug, Clone)]
pub struct InputValidator {
    limits: Limits,
    profile: ValidationProfile,
}

impl InputValidator {
    pub fn new(limits: Limits, profile: ValidationProfile) -> Self {
        Self { limits, profile }
    }

    /// Runs all checks for one submission plus its companion instruction.
    ///
    /// Fatal outcomes (empty input, oversized upload, undecodable bytes,
    /// token estimate over the hard ceiling) return `accepted = false` and
    /// must prevent the downstream completion call. Everything else is a
    /// warning surfaced alongside the accepted submission.
    pub fn validate(&self, submission: &CodeSubmission, instruction: &str) -> ValidationVerdict {
        let mut warnings = Vec::new();

        // 1. Emptiness, terminal. Whitespace-only text (Unicode included)
        // counts as empty; undecodable bytes are content and fall through to
        // the encoding check.
        let code_blank = match std::str::from_utf8(submission.raw_bytes()) {
            Ok(s) => s.trim().is_empty(),
            Err(_) => false,
        };
        if code_blank && instruction.trim().is_empty() {
            return ValidationVerdict::blocked(warnings, "no input provided");
        }

        // 2. Size ceiling, uploads only.
        if submission.origin() == &SubmissionOrigin::Upload {
            let size = submission.size_bytes();
            if size > self.limits.max_upload_bytes {
                return ValidationVerdict::blocked(
                    warnings,
                    format!(
                        "uploaded file is {size} bytes, exceeding the {}-byte maximum",
                        self.limits.max_upload_bytes
                    ),
                );
            }
        }

        // 3. Encoding.
        let code = match std::str::from_utf8(submission.raw_bytes()) {
            Ok(s) => s,
            Err(e) => {
                return ValidationVerdict::blocked(
                    warnings,
                    format!("submission is not valid UTF-8: {e}"),
                );
            }
        };

        // 4. Token budget.
        let estimate = estimate_tokens(code, instruction);
        if estimate > self.limits.token_hard_max {
            return ValidationVerdict::blocked(
                warnings,
                format!(
                    "estimated {estimate} tokens exceeds the {}-token ceiling",
                    self.limits.token_hard_max
                ),
            );
        }
        if estimate > self.limits.token_warn {
            warnings.push(format!(
                "estimated {estimate} tokens; the response may be truncated near the model's context limit"
            ));
        }

        if self.profile == ValidationProfile::Minimal {
            debug!(?estimate, "minimal profile: advisory scans skipped");
            return ValidationVerdict::accepted(warnings);
        }

        // 5. Danger-pattern scan, advisory.
        let matched = scan_danger_patterns(code);
        if !matched.is_empty() {
            warnings.push(format!(
                "potentially unsafe constructs detected: {}",
                matched.join(", ")
            ));
        }

        // 6. Long-line scan.
        self.scan_long_lines(submission, code, &mut warnings);

        // 7. Repetition heuristic.
        self.scan_repetition(code, &mut warnings);

        // 8. Python well-formedness, advisory.
        if submission.is_python() {
            if let Some(diag) = python_syntax_diagnostic(code) {
                warnings.push(format!("Python syntax check: {diag}"));
            }
        }

        debug!(
            estimate,
            warning_count = warnings.len(),
            "submission accepted"
        );
        ValidationVerdict::accepted(warnings)
    }

    fn scan_long_lines(
        &self,
        submission: &CodeSubmission,
        code: &str,
        warnings: &mut Vec<String>,
    ) {
        let threshold = match submission.origin() {
            SubmissionOrigin::Upload => self.limits.long_line_upload,
            SubmissionOrigin::Paste => self.limits.long_line_paste,
        };

        let offending: Vec<usize> = code
            .lines()
            .enumerate()
            .filter(|(_, line)| line.chars().count() > threshold)
            .map(|(i, _)| i + 1)
            .collect();
        if offending.is_empty() {
            return;
        }

        match submission.origin() {
            SubmissionOrigin::Upload => {
                let cited: Vec<String> = offending
                    .iter()
                    .take(LONG_LINE_REPORT_CAP)
                    .map(usize::to_string)
                    .collect();
                warnings.push(format!(
                    "{} line(s) exceed {threshold} characters (lines {})",
                    offending.len(),
                    cited.join(", ")
                ));
            }
            SubmissionOrigin::Paste => {
                warnings.push(format!(
                    "{} line(s) exceed {threshold} characters",
                    offending.len()
                ));
            }
        }
    }

    fn scan_repetition(&self, code: &str, warnings: &mut Vec<String>) {
        let total_lines = code.lines().count();
        if total_lines <= self.limits.repetition_min_lines {
            return;
        }

        let non_blank: Vec<&str> = code
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if non_blank.is_empty() {
            return;
        }
        let unique: std::collections::HashSet<&&str> = non_blank.iter().collect();
        if unique.len() * 2 < non_blank.len() {
            warnings.push(
                "fewer than half of the non-blank lines are unique; possible copy-paste repetition"
                    .to_string(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> InputValidator {
        InputValidator::new(Limits::default(), ValidationProfile::Strict)
    }

    fn minimal() -> InputValidator {
        InputValidator::new(Limits::default(), ValidationProfile::Minimal)
    }

    #[test]
    fn empty_input_blocks() {
        let sub = CodeSubmission::from_paste("   \n\t ");
        let v = strict().validate(&sub, "  ");
        assert!(!v.accepted);
        assert_eq!(v.blocking_reason.as_deref(), Some("no input provided"));
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn unicode_whitespace_only_paste_blocks() {
        // NBSP + em space + newline
        let sub = CodeSubmission::from_paste("\u{a0}\u{2003}\n");
        let v = strict().validate(&sub, "");
        assert!(!v.accepted);
        assert_eq!(v.blocking_reason.as_deref(), Some("no input provided"));
    }

    #[test]
    fn instruction_alone_is_enough() {
        let sub = CodeSubmission::from_paste("");
        let v = strict().validate(&sub, "Explain decorators");
        assert!(v.accepted);
    }

    #[test]
    fn oversized_upload_blocks_with_both_sizes() {
        let raw = vec![b'a'; 1_572_864]; // 1.5 MiB
        let sub = CodeSubmission::from_upload("big.py", raw);
        let v = strict().validate(&sub, "");
        assert!(!v.accepted);
        let reason = v.blocking_reason.unwrap();
        assert!(reason.contains("1572864"), "reason was: {reason}");
        assert!(reason.contains("1048576"), "reason was: {reason}");
    }

    #[test]
    fn oversized_paste_is_not_size_capped() {
        // Token ceiling still applies, so keep the paste modest.
        let text = "x = 1\n".repeat(100);
        let sub = CodeSubmission::from_paste(text);
        let v = strict().validate(&sub, "");
        assert!(v.accepted);
    }

    #[test]
    fn invalid_utf8_upload_blocks_with_detail() {
        let sub = CodeSubmission::from_upload("bin.py", vec![0xff, 0xfe, 0x41]);
        let v = strict().validate(&sub, "");
        assert!(!v.accepted);
        let reason = v.blocking_reason.unwrap();
        assert!(reason.contains("not valid UTF-8"), "reason was: {reason}");
    }

    #[test]
    fn token_estimate_is_floor_of_chars_over_three() {
        assert_eq!(estimate_tokens("abcd", ""), 1);
        assert_eq!(estimate_tokens("abcdef", "gh"), 2);
        assert_eq!(estimate_tokens("", ""), 0);
    }

    #[test]
    fn token_estimate_is_monotonic() {
        let short = "x".repeat(100);
        let long = "x".repeat(200);
        assert!(estimate_tokens(&short, "i") <= estimate_tokens(&long, "i"));
    }

    #[test]
    fn token_hard_ceiling_blocks() {
        let sub = CodeSubmission::from_paste("a".repeat(9003 + 3));
        let v = strict().validate(&sub, "");
        assert!(!v.accepted);
        assert!(v.blocking_reason.unwrap().contains("3000-token ceiling"));
    }

    #[test]
    fn token_warn_threshold_warns_but_accepts() {
        // 6300 chars -> 2100 estimated tokens: above warn, below hard max.
        let sub = CodeSubmission::from_paste("a".repeat(6300));
        let v = strict().validate(&sub, "");
        assert!(v.accepted);
        assert!(v.warnings.iter().any(|w| w.contains("2100")));
    }

    #[test]
    fn os_system_warns_but_accepts() {
        let sub = CodeSubmission::from_paste("import os\nos.system('rm -rf /tmp/x')\n");
        let v = strict().validate(&sub, "");
        assert!(v.accepted);
        assert!(
            v.warnings
                .iter()
                .any(|w| w.contains("potentially unsafe constructs")),
            "warnings were: {:?}",
            v.warnings
        );
    }

    #[test]
    fn minimal_profile_skips_advisory_scans() {
        let sub = CodeSubmission::from_paste("import os\neval(x)\n");
        let v = minimal().validate(&sub, "");
        assert!(v.accepted);
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn long_paste_lines_warn_with_count() {
        let text = format!("{}\n{}\nshort\n", "a".repeat(250), "b".repeat(250));
        let sub = CodeSubmission::from_paste(text);
        let v = strict().validate(&sub, "");
        assert!(v.accepted);
        assert!(
            v.warnings
                .iter()
                .any(|w| w.starts_with("2 line(s) exceed 200")),
            "warnings were: {:?}",
            v.warnings
        );
    }

    #[test]
    fn long_upload_lines_cite_line_numbers() {
        let mut text = String::new();
        for i in 0..7 {
            if i % 2 == 0 {
                text.push_str(&"x".repeat(600));
            } else {
                text.push_str("ok");
            }
            text.push('\n');
        }
        let sub = CodeSubmission::from_upload("wide.py", text.into_bytes());
        let v = strict().validate(&sub, "");
        let warn = v
            .warnings
            .iter()
            .find(|w| w.contains("exceed 500"))
            .expect("expected a long-line warning");
        assert!(warn.contains("lines 1, 3, 5, 7"), "warning was: {warn}");
    }

    #[test]
    fn repetition_warns_on_duplicated_lines() {
        // 60 lines drawn from only 10 distinct statements.
        let mut text = String::new();
        for i in 0..60 {
            text.push_str(&format!("x{} = {}\n", i % 10, i % 10));
        }
        let sub = CodeSubmission::from_paste(text);
        let v = strict().validate(&sub, "");
        assert!(v.accepted);
        assert!(
            v.warnings.iter().any(|w| w.contains("repetition")),
            "warnings were: {:?}",
            v.warnings
        );
    }

    #[test]
    fn short_files_skip_repetition_check() {
        let text = "same()\n".repeat(40);
        let sub = CodeSubmission::from_paste(text);
        let v = strict().validate(&sub, "");
        assert!(!v.warnings.iter().any(|w| w.contains("repetition")));
    }

    #[test]
    fn broken_python_warns_but_accepts() {
        let sub = CodeSubmission::from_upload("bad.py", b"def f(:\n    pass\n".to_vec());
        let v = strict().validate(&sub, "");
        assert!(v.accepted);
        assert!(
            v.warnings
                .iter()
                .any(|w| w.starts_with("Python syntax check:")),
            "warnings were: {:?}",
            v.warnings
        );
    }

    #[test]
    fn non_python_upload_skips_syntax_check() {
        let sub = CodeSubmission::from_upload("app.js", b"function f( {\n".to_vec());
        let v = strict().validate(&sub, "");
        assert!(
            !v.warnings
                .iter()
                .any(|w| w.starts_with("Python syntax check:"))
        );
    }

    #[test]
    fn warnings_keep_check_order() {
        // Danger pattern (check 5) must precede the long-line warning (check 6).
        let text = format!("import os\n{}\n", "y".repeat(300));
        let sub = CodeSubmission::from_paste(text);
        let v = strict().validate(&sub, "");
        let danger = v
            .warnings
            .iter()
            .position(|w| w.contains("potentially unsafe"));
        let long = v.warnings.iter().position(|w| w.contains("exceed 200"));
        assert!(danger.unwrap() < long.unwrap());
    }
}
