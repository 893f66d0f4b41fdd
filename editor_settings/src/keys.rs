//! Editor property names
//!
//! These are the keys the editor widget answers to through its
//! configuration accessor.

// Boolean settings
pub const TAB_INDENTS: &str = "tabIndents";
pub const BACKSPACE_UNINDENTS: &str = "backspaceUnindents";
pub const AUTO_INDENT: &str = "autoIndent";
pub const INDENTATION_GUIDES: &str = "indentationGuides";
pub const INDENTATIONS_USE_TABS: &str = "indentationsUseTabs";
pub const EOL_VISIBILITY: &str = "eolVisibility";
pub const MARGIN_LINE_NUMBERS: &str = "marginLineNumbers";

// Color settings
pub const COLOR: &str = "color";
pub const PAPER: &str = "paper";

// Numeric settings
pub const EDGE_COLUMN: &str = "edgeColumn";
pub const TAB_WIDTH: &str = "tabWidth";

// Multiple-choice settings
pub const BRACE_MATCHING: &str = "braceMatching";
pub const EDGE_MODE: &str = "edgeMode";
pub const EOL_MODE: &str = "eolMode";
pub const FOLDING: &str = "folding";
pub const WHITESPACE_VISIBILITY: &str = "whitespaceVisibility";
pub const WRAP_MODE: &str = "wrapMode";
pub const LANGUAGE: &str = "language";

/// Colors the editor accepts but cannot report back
pub const WRITE_ONLY_COLORS: &[&str] = &[
    // Selection
    "selectionForegroundColor",
    "selectionBackgroundColor",
    // Caret (current line)
    "caretForegroundColor",
    "caretLineBackgroundColor",
    // Edge marker
    "edgeColor",
    // Indentation guides
    "indentationGuidesForegroundColor",
    "indentationGuidesBackgroundColor",
    // Brace matching
    "matchedBraceForegroundColor",
    "matchedBraceBackgroundColor",
    "unmatchedBraceForegroundColor",
    "unmatchedBraceBackgroundColor",
    // Markers
    "markerForegroundColor",
    "markerBackgroundColor",
    // Margins
    "marginsForegroundColor",
    "marginsBackgroundColor",
    // Call tips
    "callTipsForegroundColor",
    "callTipsBackgroundColor",
    "callTipsHighlightColor",
];
