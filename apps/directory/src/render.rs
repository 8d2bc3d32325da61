//! Text rendering of the directory view.

use std::fmt::Write as _;

use directory_core::{DirectoryView, LoadState};
use shared::domain::{Member, Selector};

const MAX_CARD_SKILLS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    heading: &'static str,
    accent: &'static str,
    muted: &'static str,
    error: &'static str,
    reset: &'static str,
}

impl Palette {
    pub fn plain() -> Self {
        Self {
            heading: "",
            accent: "",
            muted: "",
            error: "",
            reset: "",
        }
    }

    pub fn light() -> Self {
        Self {
            heading: "\x1b[1;30m",
            accent: "\x1b[34m",
            muted: "\x1b[90m",
            error: "\x1b[31m",
            reset: "\x1b[0m",
        }
    }

    pub fn dark() -> Self {
        Self {
            heading: "\x1b[1;97m",
            accent: "\x1b[94m",
            muted: "\x1b[37m",
            error: "\x1b[91m",
            reset: "\x1b[0m",
        }
    }

    pub fn select(dark_mode: bool, colors: bool) -> Self {
        match (colors, dark_mode) {
            (false, _) => Self::plain(),
            (true, true) => Self::dark(),
            (true, false) => Self::light(),
        }
    }
}

pub fn render_intro(palette: Palette) -> String {
    let Palette {
        heading,
        muted,
        reset,
        ..
    } = palette;
    format!("{heading}GDGC{reset}\n{muted}Members Directory{reset}\n")
}

pub fn render_view(view: &DirectoryView<'_>, palette: Palette) -> String {
    let Palette {
        heading,
        muted,
        error,
        reset,
        ..
    } = palette;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{heading}GDGC Members{reset} {muted}{} members{reset}",
        view.visible.len()
    );

    match view.load_state {
        LoadState::Idle => {}
        LoadState::Loading => {
            let _ = writeln!(out, "{muted}Loading members...{reset}");
        }
        LoadState::Failed { message } => {
            let _ = writeln!(out, "{error}Error Loading Members{reset}");
            let _ = writeln!(out, "{error}{message}{reset}");
            let _ = writeln!(out, "{muted}Type 'retry' to try again.{reset}");
        }
        LoadState::Loaded if view.is_empty_result() => {
            let _ = writeln!(out, "No members found");
            let _ = writeln!(out, "{muted}Try adjusting your search or filters{reset}");
        }
        LoadState::Loaded => {
            for member in &view.visible {
                out.push('\n');
                out.push_str(&render_card(member, palette));
            }
        }
    }

    out
}

pub fn render_card(member: &Member, palette: Palette) -> String {
    let Palette {
        heading,
        accent,
        muted,
        reset,
        ..
    } = palette;
    let mut out = String::new();

    let _ = writeln!(out, "{heading}{}{reset}  {accent}{}{reset}", member.name, member.role);
    if !member.bio.is_empty() {
        let _ = writeln!(out, "  {}", member.bio);
    }
    let _ = writeln!(out, "  {muted}@ {}{reset}", member.location);

    let skills: Vec<String> = member
        .skills
        .iter()
        .take(MAX_CARD_SKILLS)
        .map(|skill| format!("[{skill}]"))
        .collect();
    if !skills.is_empty() {
        let _ = writeln!(out, "  {accent}{}{reset}", skills.join(" "));
    }

    out
}

/// Lists selector options, showing the sentinel as `all_label`.
pub fn render_options(all_label: &str, options: &[Selector], current: &Selector) -> String {
    let mut out = String::new();
    for option in options {
        let marker = if option == current { '*' } else { ' ' };
        match option {
            Selector::All => {
                let _ = writeln!(out, "{marker} {all_label}");
            }
            Selector::Exact(value) => {
                let _ = writeln!(out, "{marker} {value}");
            }
        }
    }
    out
}
