fn main() { phpost_tasks::entry_points::site_displacements(); }
