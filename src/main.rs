#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

#[cfg(feature = "tui")]
fn main() -> anyhow::Result<()> {
    tui_mode::run_tui()
}

#[cfg(not(feature = "tui"))]
fn main() {
    use std::io::{self, Write};

    println!("Word Calculator");
    println!("Write expressions as numbers joined by operator words:");
    println!("  add       Addition        (3 add 5 = 8)");
    println!("  subtract  Subtraction     (10 subtract 4 = 6)");
    println!("  multiply  Multiplication  (6 multiply 7 = 42)");
    println!("  divide    Division        (15 divide 3 = 5)");
    println!("Operators apply last-to-first: 3 add 5 multiply 2 = 13");
    println!("Type 'exit' to quit");

    loop {
        print!("\n> ");
        io::stdout().flush().expect("Failed to flush stdout");

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .expect("Failed to read input");
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            break;
        }

        match wordcalc::evaluate(input) {
            Ok(result) => println!("Result: {}", result),
            Err(e) => println!("Error: {}", e),
        }
    }
}
