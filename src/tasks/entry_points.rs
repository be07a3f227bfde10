/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! One function per binary; the binaries under `src/binary-shims` are
//! one-line wrappers around these.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::{App, Arg, ArgGroup, ArgMatches};

use crate::FailResult;
use crate::cmd;
use crate::ui::logging::init_global_logger;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        } else {
            error!("(run with RUST_BACKTRACE=1 for more detail)");
        }
        std::process::exit(1);
    });
}

// flags shared by every tool
fn with_common_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(Arg::with_name("verbose")
        .long("verbose").short("v").multiple(true)
        .help("Print more. Repeat for even more."))
}

fn setup(matches: &ArgMatches<'_>) -> FailResult<()>
{ init_global_logger(matches.occurrences_of("verbose")) }

fn symprec_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("symprec")
        .long("symprec").takes_value(true).value_name("TOL")
        .help("Cartesian tolerance for matching atomic positions. [default: 1e-5]")
}

fn parse_symprec(matches: &ArgMatches<'_>) -> FailResult<f64> {
    match matches.value_of("symprec") {
        None => Ok(cmd::DEFAULT_SYMPREC),
        Some(s) => Ok(s.parse()?),
    }
}

fn parse_path(matches: &ArgMatches<'_>, name: &str) -> PathBuf
{ PathBuf::from(matches.value_of_os(name).expect("(BUG) missing required arg")) }

// input files are validated up front so a typo'd path fails before any
// expensive work (or worse, half of the outputs) happens
fn parse_input_path(matches: &ArgMatches<'_>, name: &str) -> FailResult<PathBuf>
{Ok({
    let path = parse_path(matches, name);
    path_abs::PathFile::new(&path)?;
    path
})}

// %% BINARY: phpost-fc-average %%
pub fn fc_average() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-fc-average")
            .about("Average force constants over equivalent structure files.")
            .arg(Arg::with_name("poscar")
                .long("poscar").short("p")
                .takes_value(true).multiple(true).number_of_values(1).required(true)
                .value_name("POSCAR")
                .help("Structure file, one per set of force constants."))
            .arg(Arg::with_name("fc")
                .long("fc").short("f")
                .takes_value(true).multiple(true).number_of_values(1).required(true)
                .value_name("FC")
                .help("FORCE_CONSTANTS file, one per structure."))
            .arg(Arg::with_name("weights")
                .long("weights").short("w")
                .takes_value(true).multiple(true).number_of_values(1)
                .value_name("W")
                .help("Weights for the sets of the force constants."))
            .arg(symprec_arg()))
            .get_matches();
        setup(&matches)?;

        let poscars: Vec<&Path> =
            matches.values_of_os("poscar").unwrap().map(Path::new).collect();
        let fcs: Vec<&Path> =
            matches.values_of_os("fc").unwrap().map(Path::new).collect();
        let weights = match matches.values_of("weights") {
            None => None,
            Some(values) => Some(
                values.map(|w| Ok(w.parse::<f64>()?)).collect::<FailResult<Vec<f64>>>()?,
            ),
        };

        cmd::fc_average::run(&poscars, &fcs, weights, parse_symprec(&matches)?)
    });
}

// %% BINARY: phpost-fc-reduce %%
pub fn fc_reduce() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-fc-reduce")
            .about("Zero out force constants outside (or inside) symmetry orbits of atom pairs.")
            .arg(Arg::with_name("poscar")
                .long("poscar").short("p").takes_value(true)
                .default_value("POSCAR").value_name("POSCAR"))
            .arg(Arg::with_name("fc")
                .long("fc").short("f").takes_value(true)
                .default_value("FORCE_CONSTANTS").value_name("FC"))
            .arg(Arg::with_name("sym")
                .long("sym").takes_value(true).required(true).value_name("YAML")
                .help("Symmetry operations of the structure (phonopy --sym output)."))
            .arg(Arg::with_name("pairs")
                .long("pairs").takes_value(true).required(true).value_name("YAML")
                .help("File listing the fractional position pairs to select."))
            .arg(Arg::with_name("keep")
                .long("keep")
                .help("Keep only the selected pair blocks."))
            .arg(Arg::with_name("remove")
                .long("remove")
                .help("Zero exactly the selected pair blocks."))
            .group(ArgGroup::with_name("rule")
                .args(&["keep", "remove"]).required(true))
            .arg(Arg::with_name("output")
                .long("output").short("o").takes_value(true)
                .default_value("FORCE_CONSTANTS_REDUCED").value_name("FILE")))
            .get_matches();
        setup(&matches)?;

        let rule = match matches.is_present("keep") {
            true => phpost_fc::PairRule::Keep,
            false => phpost_fc::PairRule::Remove,
        };

        cmd::fc_reduce::run(
            &parse_input_path(&matches, "poscar")?,
            &parse_input_path(&matches, "fc")?,
            &parse_input_path(&matches, "sym")?,
            &parse_input_path(&matches, "pairs")?,
            rule,
            &parse_path(&matches, "output"),
        )
    });
}

// %% BINARY: phpost-fc-distribution %%
pub fn fc_distribution() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-fc-distribution")
            .about("Tabulate a force-constant block over its symmetry orbit.")
            .arg(Arg::with_name("poscar")
                .long("poscar").short("p").takes_value(true).required(true)
                .value_name("POSCAR")
                .help("The disordered structure the force constants belong to."))
            .arg(Arg::with_name("ideal")
                .long("ideal").short("i").takes_value(true).required(true)
                .value_name("POSCAR")
                .help("The ideal (averaged) structure that defines the symmetry."))
            .arg(Arg::with_name("fc")
                .long("fc").short("f").takes_value(true)
                .default_value("FORCE_CONSTANTS").value_name("FC"))
            .arg(Arg::with_name("sym")
                .long("sym").takes_value(true).required(true).value_name("YAML")
                .help("Symmetry operations of the ideal structure (phonopy --sym output)."))
            .arg(Arg::with_name("pair")
                .long("pair").short("a")
                .takes_value(true).number_of_values(2).required(true)
                .value_name("ATOM")
                .help("Anchor pair of (0-based) atom indices."))
            .arg(symprec_arg())
            .arg(Arg::with_name("output")
                .long("output").short("o").takes_value(true)
                .default_value("fc_values.dat").value_name("FILE")))
            .get_matches();
        setup(&matches)?;

        let pair: Vec<usize> = matches.values_of("pair").unwrap()
            .map(|s| Ok(s.parse::<usize>()?))
            .collect::<FailResult<_>>()?;

        cmd::fc_distribution::run(
            &parse_input_path(&matches, "poscar")?,
            &parse_input_path(&matches, "ideal")?,
            &parse_input_path(&matches, "fc")?,
            &parse_input_path(&matches, "sym")?,
            (pair[0], pair[1]),
            parse_symprec(&matches)?,
            &parse_path(&matches, "output"),
        )
    });
}

// %% BINARY: phpost-fc-enlarge %%
pub fn fc_enlarge() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-fc-enlarge")
            .about("Replicate force constants onto an enlarged supercell.")
            .arg(Arg::with_name("config")
                .takes_value(true).required(true).value_name("CONFIG")
                .help("YAML config file; see the module docs for the schema.")))
            .get_matches();
        setup(&matches)?;

        cmd::fc_enlarge::run(&parse_input_path(&matches, "config")?)
    });
}

// %% BINARY: phpost-eos-fit %%
pub fn eos_fit() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-eos-fit")
            .about("Fit an equation of state to an energy-volume curve.")
            .arg(Arg::with_name("data")
                .takes_value(true).required(true).value_name("FILE")
                .help("Two-column file: volume (A^3) and energy (eV)."))
            .arg(Arg::with_name("eos")
                .long("eos").takes_value(true).default_value("Vinet")
                .value_name("NAME")
                .help("One of: Vinet, BM2, BM3, Murnaghan.")))
            .get_matches();
        setup(&matches)?;

        let eos = matches.value_of("eos").unwrap().parse()?;
        cmd::eos_fit::run(&parse_input_path(&matches, "data")?, eos)
    });
}

// %% BINARY: phpost-debye %%
pub fn debye() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-debye")
            .about("Debye temperature and Debye-model thermodynamic functions.")
            .arg(Arg::with_name("volume")
                .long("volume").takes_value(true).required(true).value_name("V")
                .help("Volume per atom, in A^3."))
            .arg(Arg::with_name("bulk-modulus")
                .long("bulk-modulus").takes_value(true).required(true).value_name("B")
                .help("Bulk modulus, in eV/A^3."))
            .arg(Arg::with_name("mass")
                .long("mass").takes_value(true).required(true).value_name("M")
                .help("Mean atomic mass, in Da."))
            .arg(Arg::with_name("poisson")
                .long("poisson").takes_value(true).default_value("0.25")
                .value_name("NU"))
            .arg(Arg::with_name("t-max")
                .long("t-max").takes_value(true).default_value("1000").value_name("K"))
            .arg(Arg::with_name("t-step")
                .long("t-step").takes_value(true).default_value("10").value_name("K"))
            .arg(Arg::with_name("output")
                .long("output").short("o").takes_value(true)
                .default_value("thermal_properties.dat").value_name("FILE")))
            .get_matches();
        setup(&matches)?;

        let arg = |name: &str| -> FailResult<f64> {
            Ok(matches.value_of(name).unwrap().parse()?)
        };
        cmd::debye::run(&cmd::debye::Args {
            volume: arg("volume")?,
            bulk_modulus: arg("bulk-modulus")?,
            mass: arg("mass")?,
            poisson: arg("poisson")?,
            t_max: arg("t-max")?,
            t_step: arg("t-step")?,
        }, &parse_path(&matches, "output"))
    });
}

// %% BINARY: phpost-atomic-volume %%
pub fn atomic_volume() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-atomic-volume")
            .about("Per-atom volume statistics (Voronoi cells, or mesh-sampled).")
            .arg(Arg::with_name("poscar")
                .takes_value(true).required(true).value_name("POSCAR"))
            .arg(Arg::with_name("mesh")
                .long("mesh").short("m")
                .takes_value(true).number_of_values(3).value_name("N")
                .help("Sample on a mesh instead of computing exact Voronoi cells.")))
            .get_matches();
        setup(&matches)?;

        let mesh = match matches.values_of("mesh") {
            None => None,
            Some(values) => {
                let mesh: Vec<usize> = values
                    .map(|s| Ok(s.parse::<usize>()?))
                    .collect::<FailResult<_>>()?;
                Some([mesh[0], mesh[1], mesh[2]])
            },
        };

        cmd::volumes::run(&parse_input_path(&matches, "poscar")?, mesh)
    });
}

// %% BINARY: phpost-site-displacements %%
pub fn site_displacements() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-site-displacements")
            .about("Squared atomic displacements relative to an ideal structure.")
            .arg(Arg::with_name("poscar")
                .takes_value(true).required(true).value_name("POSCAR"))
            .arg(Arg::with_name("ideal")
                .takes_value(true).required(true).value_name("POSCAR_IDEAL"))
            .arg(Arg::with_name("output")
                .long("output").short("o").takes_value(true)
                .default_value("sad.dat").value_name("FILE")))
            .get_matches();
        setup(&matches)?;

        cmd::displacements::run(
            &parse_input_path(&matches, "poscar")?,
            &parse_input_path(&matches, "ideal")?,
            &parse_path(&matches, "output"),
        )
    });
}

// %% BINARY: phpost-band-path %%
pub fn band_path() {
    wrap_result_main(|| {
        let matches = with_common_args(App::new("phpost-band-path")
            .about("High-symmetry band path for a space group.")
            .arg(Arg::with_name("spg")
                .long("spg").takes_value(true).required(true).value_name("N")
                .help("Space group number (1-230)."))
            .arg(Arg::with_name("points")
                .long("points").takes_value(true).default_value("51").value_name("N")
                .help("BAND_POINTS value for the conf output."))
            .arg(Arg::with_name("output")
                .long("output").short("o").takes_value(true).value_name("FILE")
                .help("Also write phonopy BAND tags to this conf file.")))
            .get_matches();
        setup(&matches)?;

        cmd::band_path::run(
            matches.value_of("spg").unwrap().parse()?,
            matches.value_of("points").unwrap().parse()?,
            matches.value_of_os("output").map(Path::new),
        )
    });
}
