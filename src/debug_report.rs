use std::collections::BTreeSet;
use vyakarana::{Analysis, Derivation, lookup_rule_text};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

fn section(palette: &ansi::Palette, title: &str) {
    println!("\n{}", palette.paint(format!("━━━ {title} ━━━"), ansi::GRAY));
}

pub fn print_derivation(derivation: &Derivation, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Deriving: {}", derivation.input), ansi::CYAN)));

    section(&palette, "Steps");
    for step in &derivation.steps {
        let id = step.rule.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{:>2}]", step.index), ansi::GRAY),
            palette.paint(format!("{id:<8}"), ansi::BLUE),
            palette.bold(palette.paint(&step.surface, ansi::GREEN)),
            palette.dim(format!("│ {}", step.operation)),
        );
        // Falls back to the bare id when the sutra text is not listed.
        if let Some(text) = step.rule.and_then(lookup_rule_text) {
            let note = if text.note.is_empty() { String::new() } else { format!(" ({})", text.note) };
            println!("       {}", palette.dim(format!("{}{note}", text.text)));
        }
    }

    section(&palette, "Result");
    println!("  {}", palette.bold(palette.paint(&derivation.surface, ansi::GREEN)));

    section(&palette, "Timing");
    let phases = derivation
        .metrics
        .phases
        .iter()
        .map(|p| {
            let duration = palette.paint(format!("{:?}", p.duration), ansi::CYAN);
            format!("{}: {duration} ({} passes)", p.name, p.passes.len())
        })
        .collect::<Vec<_>>()
        .join("  │  ");
    println!(
        "  Total: {}  │  Rules fired: {}",
        palette.paint(format!("{:?}", derivation.elapsed), ansi::GREEN),
        palette.paint(derivation.metrics.rules_fired().to_string(), ansi::YELLOW),
    );
    println!("  {}", palette.dim(phases));
    println!();
}

const CASES: [&str; 8] = ["nom.", "acc.", "ins.", "dat.", "abl.", "gen.", "loc.", "voc."];

pub fn print_table(stem: &str, cells: &[Derivation], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Declining: {stem}"), ansi::CYAN)));
    section(&palette, "Paradigm");
    println!(
        "  {:<6} {:<16} {:<16} {}",
        "",
        palette.dim("singular"),
        palette.dim("dual"),
        palette.dim("plural")
    );
    for (label, row) in CASES.iter().zip(cells.chunks(3)) {
        let forms: Vec<String> = row.iter().map(|d| format!("{:<16}", d.surface)).collect();
        println!("  {} {}", palette.paint(format!("{label:<6}"), ansi::BLUE), forms.join(" "));
    }
    let total: std::time::Duration = cells.iter().map(|d| d.elapsed).sum();
    section(&palette, "Timing");
    println!("  Total: {}", palette.paint(format!("{total:?}"), ansi::GREEN));
    println!();
}

pub fn print_pratyahara(name: &str, members: &BTreeSet<&'static str>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "{} {} {}",
        palette.bold(palette.paint(name, ansi::CYAN)),
        palette.dim(format!("({})", members.len())),
        members.iter().copied().collect::<Vec<_>>().join(" ")
    );
}

fn cell_label(case: u8, number: u8) -> String {
    let number = ["sg.", "du.", "pl."][usize::from(number - 1)];
    format!("{} {number}", CASES[usize::from(case - 1)])
}

pub fn print_analyses(form: &str, analyses: &[Analysis], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Analyzing: {form}"), ansi::CYAN)));
    section(&palette, "Readings");
    if analyses.is_empty() {
        println!("{}", palette.dim("  No listed stem produces this form"));
    }
    for (idx, a) in analyses.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.bold(palette.paint(a.stem, ansi::GREEN)),
            palette.dim(format!("│ {}", a.gender.label())),
            palette.paint(cell_label(a.case, a.number), ansi::YELLOW),
        );
    }
    println!();
}
