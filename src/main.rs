use std::env;

fn main() -> rustyline::Result<()> {
    let user = env::var("USER").unwrap_or_else(|_| "there".to_string());
    println!("Hello {}! This is the Kea programming language!", user);
    println!("Feel free to type in commands");
    kea::repl::start()
}
