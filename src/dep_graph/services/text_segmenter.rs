use crate::shared::error::GraphError;
use crate::shared::Result;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// `[INFO] `, `[WARNING] `, ... at the start of a line. Only one space goes
/// with the label; the rest is tree indentation.
static LOG_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\[[A-Za-z]+\] ?").expect("valid log label regex"));

static ERROR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\[ERROR\].*$").expect("valid error line regex"));

/// `digraph "root" {` at the start of a line, up to the first line opening with `}`
static DIGRAPH_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?ms)^digraph\s+".*?^[ \t]*\}"#).expect("valid digraph regex")
});

/// `--- maven-dependency-plugin:3.6.1:tree (default-cli) @ app ---`
/// and the short `--- dependency:3.6.1:tree ...` form of Maven 3.9
static TREE_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-{3}\s+(?:[\w.-]+:)?(?:maven-dependency-plugin|dependency):[^:\s]+:tree\b")
        .expect("valid tree banner regex")
});

/// Number of `[ERROR]` lines quoted in a build failure message
const MAX_ERROR_EXCERPT_LINES: usize = 10;

/// TextSegmenter - splits raw build tool stdout into graph-shaped blocks
///
/// Pure text processing; no I/O. Each returned block is self-contained and
/// can be handed to the digraph or tree builder.
pub struct TextSegmenter;

impl TextSegmenter {
    /// Extracts every `digraph "root" { ... }` block
    ///
    /// # Errors
    /// - [`GraphError::BuildFailure`] when the output has `[ERROR]` lines and no `BUILD SUCCESS`
    /// - [`GraphError::NoGraphsFound`] when no digraph block is present
    pub fn extract_digraphs(output: &str) -> Result<Vec<String>> {
        Self::check_build_errors(output)?;
        let cleaned = Self::strip_log_labels(output);

        let digraphs: Vec<String> = DIGRAPH_BLOCK
            .find_iter(&cleaned)
            .map(|m| m.as_str().to_string())
            .collect();

        if digraphs.is_empty() {
            return Err(GraphError::NoGraphsFound.into());
        }
        debug!(count = digraphs.len(), "extracted digraph blocks");
        Ok(digraphs)
    }

    /// Extracts indented tree blocks, each starting with its plugin banner line
    ///
    /// Output written with `-DoutputFile` has no banner; when no banner is
    /// found and the first line looks like a coordinate, the whole text is
    /// returned as one block.
    ///
    /// # Errors
    /// Same conditions as [`TextSegmenter::extract_digraphs`]
    pub fn extract_trees(output: &str) -> Result<Vec<String>> {
        Self::check_build_errors(output)?;
        let cleaned = Self::strip_log_labels(output);

        let mut trees = Vec::new();
        let mut current: Option<Vec<&str>> = None;

        for line in cleaned.lines() {
            let trimmed = line.trim_end();
            if TREE_BANNER.is_match(trimmed) {
                if let Some(block) = current.take() {
                    trees.push(block.join("\n"));
                }
                current = Some(vec![trimmed]);
                continue;
            }
            let Some(block) = current.as_mut() else {
                continue;
            };
            let is_root_line = block.len() == 1;
            let is_child_line = trimmed.starts_with(['+', '\\', '|', ' ']);
            if !trimmed.is_empty() && !trimmed.starts_with("---") && (is_root_line || is_child_line)
            {
                block.push(trimmed);
                continue;
            }
            // A banner with nothing below it is not a tree
            if block.len() > 1 {
                trees.push(block.join("\n"));
            }
            current = None;
        }
        if let Some(block) = current {
            if block.len() > 1 {
                trees.push(block.join("\n"));
            }
        }

        if trees.is_empty() && Self::looks_like_bare_tree(&cleaned) {
            trees.push(cleaned.trim().to_string());
        }

        if trees.is_empty() {
            return Err(GraphError::NoGraphsFound.into());
        }
        debug!(count = trees.len(), "extracted dependency tree blocks");
        Ok(trees)
    }

    /// Removes log level prefixes such as `[INFO] ` from every line
    pub fn strip_log_labels(output: &str) -> String {
        LOG_LABEL.replace_all(output, "").into_owned()
    }

    /// True when `line` is a dependency plugin `tree` goal banner
    pub fn is_tree_banner(line: &str) -> bool {
        TREE_BANNER.is_match(line.trim())
    }

    /// Fails on `[ERROR]` lines unless the build still reported success
    fn check_build_errors(output: &str) -> Result<()> {
        if output.contains("BUILD SUCCESS") {
            return Ok(());
        }
        let errors: Vec<&str> = ERROR_LINE
            .find_iter(output)
            .map(|m| m.as_str().trim_end())
            .take(MAX_ERROR_EXCERPT_LINES)
            .collect();
        if errors.is_empty() {
            return Ok(());
        }
        Err(GraphError::BuildFailure {
            excerpt: errors.join("\n"),
        }
        .into())
    }

    fn looks_like_bare_tree(cleaned: &str) -> bool {
        let mut lines = cleaned.lines().map(str::trim_end).filter(|l| !l.is_empty());
        let Some(first) = lines.next() else {
            return false;
        };
        let root_is_coordinate = !first.starts_with(' ')
            && first
                .split_whitespace()
                .next()
                .is_some_and(|token| (4..=6).contains(&token.split(':').count()));
        let has_child = lines
            .next()
            .is_some_and(|l| l.starts_with("+-") || l.starts_with("\\-") || l.starts_with('|'));
        root_is_coordinate && has_child
    }
}
