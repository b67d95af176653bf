use crate::env::{Env, Environment};
use crate::eval::eval;
use crate::lexer::Lexer;
use crate::macros::{define_macros, expand_macros};
use crate::parser::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = ">>> ";

pub fn start() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let env = Environment::new();
    let macro_env = Environment::new();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" {
                    return Ok(());
                }
                let _ = rl.add_history_entry(line);

                if let Some(output) = run_line(line, &env, &macro_env) {
                    println!("{}", output);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

// One read-eval-print round; returns what should be printed, if anything.
// Split out from the editor loop so it can be driven directly in tests.
fn run_line(line: &str, env: &Env, macro_env: &Env) -> Option<String> {
    let lexer = Lexer::new(line);
    let mut parser = Parser::new(lexer);
    let mut program = parser.parse_program();

    if !parser.errors().is_empty() {
        return Some(render_parse_errors(parser.errors()));
    }

    define_macros(&mut program, macro_env);
    let expanded = expand_macros(program, macro_env);

    eval(&expanded, env).map(|evaluated| evaluated.inspect())
}

fn render_parse_errors(errors: &[String]) -> String {
    let mut out = String::from("Woops! We ran into some parrot business here!\n");
    out.push_str(" parser errors:\n");
    for msg in errors {
        out.push('\t');
        out.push_str(msg);
        out.push('\n');
    }
    out.pop();
    out
}
