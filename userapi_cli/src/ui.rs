// Terminal output helpers shared by the commands
use colored::Colorize;

pub enum CheckMark {
    Passed,
    Failed,
    Skipped,
}

pub fn print_header(text: &str) {
    println!("\n{}", text.bold().cyan());
    println!("{}", "=".repeat(text.chars().count()).cyan());
}

/// One line per check in the results listing.
pub fn print_check(mark: CheckMark, name: &str) {
    match mark {
        CheckMark::Passed => println!("  {} {}", "✓".green(), name),
        CheckMark::Failed => println!("  {} {}", "✗".red().bold(), name.red()),
        CheckMark::Skipped => println!("  {} {} (skipped)", "-".dimmed(), name.dimmed()),
    }
}

pub fn print_success(text: &str) {
    println!("{} {}", "✓".green().bold(), text.green().bold());
}

pub fn print_error(text: &str) {
    eprintln!("{} {}", "✗".red().bold(), text.red());
}

pub fn print_warning(text: &str) {
    println!("{} {}", "⚠".yellow().bold(), text.yellow());
}

pub fn print_info(text: &str) {
    println!("{} {}", "ℹ".blue().bold(), text);
}
