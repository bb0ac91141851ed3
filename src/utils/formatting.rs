//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// "1 task" / "3 tasks"
pub fn plural_tasks(n: u64) -> String {
    if n == 1 {
        "1 task".to_string()
    } else {
        format!("{n} tasks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural() {
        assert_eq!(plural_tasks(0), "0 tasks");
        assert_eq!(plural_tasks(1), "1 task");
        assert_eq!(plural_tasks(12), "12 tasks");
    }

    #[test]
    fn pads() {
        assert_eq!(pad_left("7", 3), "  7");
    }
}
