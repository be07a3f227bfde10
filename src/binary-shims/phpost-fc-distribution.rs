fn main() { phpost_tasks::entry_points::fc_distribution(); }
