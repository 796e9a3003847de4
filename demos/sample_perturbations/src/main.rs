use std::{path::PathBuf, process::ExitCode};

use argh::FromArgs;

use regi_io::{prepare_output_dir, read_scene_json, CsvRecordSink, IoError};
use regi_perturb::{run_perturbations, PerturbConfig, SamplingStdDevs};

#[derive(FromArgs, Debug)]
/// Sample random camera pose perturbations about a ground-truth pose.
///
/// Writes offset_amounts.csv, se3_lie_params.csv and cam_extrins_to_vol_poses.csv into the
/// output directory. The first sample is always the ground truth.
struct Args {
    /// path to the JSON scene (camera, ground-truth pose, anchor)
    #[argh(positional)]
    scene: PathBuf,

    /// number of samples to draw, including the ground truth
    #[argh(positional)]
    num_samples: usize,

    /// directory receiving the CSV files, created when missing
    #[argh(positional)]
    output_dir: PathBuf,

    /// seed for reproducible runs, OS entropy when absent
    #[argh(option)]
    rng_seed: Option<u64>,

    /// std. dev. of the rotation about X, in degrees
    #[argh(option, default = "1.0")]
    rot_x_std_deg: f64,

    /// std. dev. of the rotation about Y, in degrees
    #[argh(option, default = "1.0")]
    rot_y_std_deg: f64,

    /// std. dev. of the rotation about Z, in degrees
    #[argh(option, default = "1.0")]
    rot_z_std_deg: f64,

    /// std. dev. of the translation along X
    #[argh(option, default = "1.0")]
    trans_x_std: f64,

    /// std. dev. of the translation along Y
    #[argh(option, default = "1.0")]
    trans_y_std: f64,

    /// std. dev. of the translation along Z
    #[argh(option, default = "5.0")]
    trans_z_std: f64,
}

impl Args {
    fn config(&self) -> PerturbConfig {
        PerturbConfig {
            num_samples: self.num_samples,
            std_devs: SamplingStdDevs {
                rot_deg: [self.rot_x_std_deg, self.rot_y_std_deg, self.rot_z_std_deg],
                trans: [self.trans_x_std, self.trans_y_std, self.trans_z_std],
            },
            rng_seed: self.rng_seed,
        }
    }
}

const EXIT_BAD_USE: u8 = 1;
const EXIT_BAD_INPUT: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = args.config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        return ExitCode::from(EXIT_BAD_USE);
    }

    if let Err(e) = prepare_output_dir(&args.output_dir) {
        eprintln!("Error: {e}");
        return ExitCode::from(EXIT_BAD_USE);
    }

    let scene = match read_scene_json(&args.scene) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error reading scene {}: {e}", args.scene.display());
            return ExitCode::from(EXIT_BAD_INPUT);
        }
    };

    match write_records(&args.output_dir, &scene, &config) {
        Ok(num_samples) => {
            log::info!("wrote {num_samples} samples to {}", args.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_BAD_INPUT)
        }
    }
}

fn write_records(
    output_dir: &std::path::Path,
    scene: &regi_perturb::PerturbationScene,
    config: &PerturbConfig,
) -> Result<usize, IoError> {
    let mut sink = CsvRecordSink::create(output_dir)?;
    let num_samples = run_perturbations(scene, config, &mut sink)?;
    Ok(num_samples)
}
