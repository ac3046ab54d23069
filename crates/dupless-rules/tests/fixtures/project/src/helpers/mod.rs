pub struct Formatter;

impl Formatter {
    pub fn format_dupa(&self) -> String {
        String::new()
    }
}
