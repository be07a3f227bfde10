fn main() { phpost_tasks::entry_points::debye(); }
