use shapegen_core::builtin_targets;

pub fn run() -> i32 {
    for target in builtin_targets() {
        println!("{:<12} {}", target.name(), target.description());
    }
    0
}
