pub fn run() -> i32 {
    let xyzVar = 1;
    let mut counter = 0;
    counter += xyzVar;
    counter
}
