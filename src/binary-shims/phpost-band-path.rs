fn main() { phpost_tasks::entry_points::band_path(); }
