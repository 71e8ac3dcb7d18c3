use healthbot::{Classification, Message, Outcome, Sender, Signals};

pub mod ansi {
    const RESET: &str = "\x1b[0m";
    const DIM: &str = "\x1b[2m";
    const BOLD: &str = "\x1b[1m";
    const CLEAR_LINE: &str = "\r\x1b[2K";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    /// Wraps text in SGR codes when color is on; plain passthrough otherwise.
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        fn wrap(&self, code: &str, s: impl AsRef<str>) -> String {
            let s = s.as_ref();
            if self.enabled { format!("{code}{s}{RESET}") } else { s.to_string() }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.wrap(color, s)
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.wrap(BOLD, s)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.wrap(DIM, s)
        }

        /// Carriage return plus erase-line, used to drop the typing indicator.
        pub fn clear_line(&self) -> &'static str {
            CLEAR_LINE
        }
    }
}

pub fn print_classification(res: &Classification, palette: &ansi::Palette) {
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Classifying: \"{}\"", res.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Signals ━━━", ansi::GRAY));
    print_signal("greeting", res.signals.contains(Signals::GREETING), palette);
    print_signal("topic", res.signals.contains(Signals::TOPIC), palette);
    for (idx, name) in res.matched_rules.iter().enumerate() {
        let decided = matches!(res.outcome, Outcome::Topic { name: winner, .. } if winner == *name);
        let marker = if decided { palette.paint("◀ answered", ansi::GREEN) } else { palette.dim("(shadowed)") };
        println!("    {} {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), palette.paint(name, ansi::BLUE), marker);
    }

    println!("\n{}", palette.paint("━━━ Outcome ━━━", ansi::GRAY));
    let detail = match res.outcome {
        Outcome::Greeting { index } => format!("greeting pool #{index}"),
        Outcome::Topic { rule, name } => format!("rule {rule} ({name})"),
        Outcome::Fallback { index } => format!("fallback pool #{index}"),
    };
    println!("  {} {}", palette.bold(palette.paint(res.outcome.label(), ansi::GREEN)), palette.dim(format!("│ {detail}")));
    println!("  {}", res.response);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", res.elapsed), ansi::GREEN));
    println!();
}

fn print_signal(label: &str, hit: bool, palette: &ansi::Palette) {
    let mark = if hit { palette.paint("✓", ansi::GREEN) } else { palette.dim("✗") };
    println!("  {} {}", palette.paint(format!("{label}:"), ansi::BLUE), mark);
}

pub fn print_message(message: &Message, palette: &ansi::Palette) {
    let (who, color) = match message.sender {
        Sender::User => ("you", ansi::YELLOW),
        Sender::Assistant => ("assistant", ansi::CYAN),
    };
    println!("{} {} {}", palette.dim(message.clock_label()), palette.bold(palette.paint(who, color)), message.text);
}

pub fn typing_indicator(palette: &ansi::Palette) -> String {
    palette.dim("assistant is typing ● ● ●")
}
