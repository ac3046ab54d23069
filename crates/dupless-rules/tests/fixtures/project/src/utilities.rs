pub fn identity(value: i32) -> i32 {
    value
}
