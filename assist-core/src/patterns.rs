//! Danger-pattern table: lexical signatures of potentially unsafe Python.
//!
//! One versioned table of `(regex, label)` pairs shared by every caller, so
//! a pattern fix lands everywhere at once. Detection is heuristic and
//! advisory only; a match annotates the verdict, it never blocks.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// One entry in the danger-pattern table.
#[derive(Debug, Clone, Copy)]
pub struct DangerPattern {
    /// Regex source, matched case-insensitively against the whole code text.
    pub pattern: &'static str,
    /// Short human label used in the aggregated warning.
    pub label: &'static str,
}

/// The fixed advisory table. Order is the reporting order.
pub const DANGER_PATTERNS: &[DangerPattern] = &[
    DangerPattern {
        pattern: r"\bimport\s+(os|subprocess|sys)\b",
        label: "process/OS module import",
    },
    DangerPattern {
        pattern: r"\bos\.(system|popen|exec\w*|spawn\w*)\s*\(",
        label: "process execution (os)",
    },
    DangerPattern {
        pattern: r"\bsubprocess\.\w+\s*\(",
        label: "process execution (subprocess)",
    },
    DangerPattern {
        pattern: r"\beval\s*\(",
        label: "dynamic evaluation (eval)",
    },
    DangerPattern {
        pattern: r"\bexec\s*\(",
        label: "dynamic execution (exec)",
    },
    DangerPattern {
        pattern: r"\b__import__\s*\(",
        label: "dynamic import (__import__)",
    },
    DangerPattern {
        pattern: r"\bopen\s*\(",
        label: "file access (open)",
    },
    DangerPattern {
        pattern: r"\binput\s*\(",
        label: "interactive input (input)",
    },
    DangerPattern {
        pattern: r"\bcompile\s*\(",
        label: "dynamic compilation (compile)",
    },
    DangerPattern {
        pattern: r"\b(getattr|setattr|hasattr|delattr)\s*\(",
        label: "reflection attribute access",
    },
    DangerPattern {
        pattern: r"\b(globals|locals|vars|dir)\s*\(",
        label: "namespace introspection",
    },
];

static COMPILED: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    DANGER_PATTERNS
        .iter()
        .map(|p| {
            let re = RegexBuilder::new(p.pattern)
                .case_insensitive(true)
                .build()
                .expect("danger pattern table must compile");
            (re, p.label)
        })
        .collect()
});

/// Returns the labels of all patterns matching `code`, in table order.
pub fn scan_danger_patterns(code: &str) -> Vec<&'static str> {
    COMPILED
        .iter()
        .filter(|(re, _)| re.is_match(code))
        .map(|(_, label)| *label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_compiles() {
        assert_eq!(COMPILED.len(), DANGER_PATTERNS.len());
    }

    #[test]
    fn os_system_call_matches_without_import() {
        let hits = scan_danger_patterns("os.system('ls')\n");
        assert!(hits.contains(&"process execution (os)"));
    }

    #[test]
    fn import_and_call_both_match() {
        let code = "import os\nos.system('ls')\n";
        let hits = scan_danger_patterns(code);
        assert!(hits.contains(&"process/OS module import"));
        assert!(hits.contains(&"process execution (os)"));
    }

    #[test]
    fn case_insensitive() {
        let hits = scan_danger_patterns("EVAL(payload)");
        assert!(hits.contains(&"dynamic evaluation (eval)"));
    }

    #[test]
    fn clean_code_matches_nothing() {
        let hits = scan_danger_patterns("def add(a, b):\n    return a + b\n");
        assert!(hits.is_empty());
    }

    #[test]
    fn reporting_order_follows_table() {
        let code = "x = getattr(obj, 'f')\ny = eval('1')\n";
        let hits = scan_danger_patterns(code);
        assert_eq!(
            hits,
            vec!["dynamic evaluation (eval)", "reflection attribute access"]
        );
    }
}
