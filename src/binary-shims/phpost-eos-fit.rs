fn main() { phpost_tasks::entry_points::eos_fit(); }
