mod helpers;
mod naming;
mod utilities;
mod utils;

pub fn Dupa() {}

pub fn greet() -> &'static str {
    "hello"
}
