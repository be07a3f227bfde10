fn main() { phpost_tasks::entry_points::atomic_volume(); }
