pub fn clamp(value: i32) -> i32 {
    value.max(0)
}
