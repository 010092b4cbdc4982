//! Shared prompt and layout helpers for leadcmd
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `search: `
//! - Feedback: short and final: `Saved.`, `Cancelled.`
//! - Errors and warnings go to stderr so table and CSV output stay clean

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, Confirm, InquireError, MultiSelect, Select, Text};
use std::io::{self, Write};

// ============================================================================
// Layout Primitives
// ============================================================================

/// Checkbox marker for selectable table rows
#[inline]
pub fn selection_marker(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

/// Truncate to at most `max_chars` characters, ending in an ellipsis when cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{}…", kept.trim_end())
}

/// Pad or cut `s` to exactly `width` columns.
pub fn fit(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width), width = width)
}

/// Terminal dimensions, defaulting to 80x24 for pipes and non-TTY output
pub fn term_size() -> (usize, usize) {
    crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24))
}

/// Content rows that fit under a header and above a status line.
pub fn visible_lines() -> usize {
    let (_, height) = term_size();
    height.saturating_sub(4).max(5)
}

pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

// ============================================================================
// Message Functions
// ============================================================================

#[inline]
pub fn status(msg: &str) {
    println!("{}", msg);
}

#[inline]
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

#[inline]
pub fn warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}

// ============================================================================
// Prompts
// ============================================================================

pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Selection menu. Returns the chosen index, or None on escape.
pub fn select<T: ToString>(prompt: &str, options: &[T]) -> Result<Option<usize>> {
    if options.is_empty() {
        return Ok(None);
    }

    // Index prefix keeps duplicate labels distinguishable
    let items: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{:>2}. {}", i + 1, o.to_string()))
        .collect();

    let result = Select::new(prompt, items.clone())
        .with_render_config(minimal_render_config())
        .with_page_size(visible_lines())
        .with_vim_mode(true)
        .prompt_skippable()?;

    Ok(result.and_then(|chosen| items.iter().position(|i| *i == chosen)))
}

/// Checkbox list. Returns indices of the checked options, or None on escape.
pub fn multi_select<T: ToString>(
    prompt: &str,
    options: &[T],
    checked: &[usize],
) -> Result<Option<Vec<usize>>> {
    let items: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let result = MultiSelect::new(prompt, items.clone())
        .with_render_config(minimal_render_config())
        .with_default(checked)
        .with_page_size(visible_lines())
        .prompt_skippable()?;

    Ok(result.map(|chosen| {
        chosen
            .iter()
            .filter_map(|c| items.iter().position(|i| i == c))
            .collect()
    }))
}

pub fn text_input(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let mut builder = Text::new(prompt).with_render_config(minimal_render_config());
    if let Some(d) = default.filter(|d| !d.is_empty()) {
        builder = builder.with_default(d);
    }
    Ok(builder.prompt_skippable()?)
}

/// Yes/no prompt, default no
pub fn confirm(prompt: &str) -> Result<bool> {
    let result = Confirm::new(prompt)
        .with_render_config(minimal_render_config())
        .with_default(false)
        .prompt_skippable()?;
    Ok(result.unwrap_or(false))
}

/// Pause until enter
pub fn wait_for_continue() {
    println!();
    let _ = Text::new("[enter]")
        .with_render_config(minimal_render_config())
        .prompt_skippable();
}

// ============================================================================
// Form Input Helpers
// ============================================================================

pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

/// Prompt for a field showing its current value.
/// Empty input keeps the current value; `-` clears it.
pub fn prompt_field(field: &str, current: Option<&str>) -> Result<FormResult<String>> {
    let has_value = current.is_some_and(|v| !v.is_empty());
    let prompt = match current {
        Some(val) if !val.is_empty() => format!("{} [{}] (- clears): ", field, truncate(val, 30)),
        _ => format!("{}: ", field),
    };

    match Text::new(&prompt).with_render_config(minimal_render_config()).prompt() {
        Ok(input) => {
            let input = input.trim();
            if input == "-" && has_value {
                Ok(FormResult::Value(String::new()))
            } else if input.is_empty() {
                Ok(FormResult::Value(current.unwrap_or("").to_string()))
            } else {
                Ok(FormResult::Value(input.to_string()))
            }
        }
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompt for a field with no current value. Skipping yields an empty string.
pub fn prompt_field_optional(field: &str) -> Result<FormResult<String>> {
    prompt_field(field, None)
}

/// Empty strings become None
pub fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
