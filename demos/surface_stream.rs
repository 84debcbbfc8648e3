//! RippleEngine surface streaming demo
//!
//! Runs the per-frame rebuild loop headlessly on a fixed 60 Hz clock and
//! reports frame timings.
//!
//! # Usage
//!
//! ```bash
//! # 120 frames of the reference 50x50 surface into host memory
//! cargo run --release --example surface_stream -- --frames 120
//!
//! # Custom resolution and seed
//! cargo run --example surface_stream -- --resolution 200x120 --seed 42
//!
//! # Stream into a real GPU buffer
//! cargo run --example surface_stream --features gpu -- --gpu
//! ```

use std::path::PathBuf;
use std::process;

use ripple_core::{Result, SurfaceConfig};
use ripple_mesh::Resolution;
use ripple_render::{FixedStepClock, HostBuffer, StreamTarget, SurfaceStream};

fn print_usage() {
    eprintln!(
        r#"RippleEngine surface streaming demo

USAGE:
    surface_stream [OPTIONS]

OPTIONS:
    --frames <N>          Number of frames to stream (default 60)
    --resolution <UxV>    Samples along u and v (default 50x50)
    --seed <N>            Control grid seed
    --config <PATH>       Load a JSON surface config; flags override it
    --serial              Disable the parallel tessellation path
    --gpu                 Stream into a wgpu buffer (needs the `gpu` feature)
    --help                Show this help message

Set RUST_LOG=debug for per-stage logging.
"#
    );
}

struct Options {
    frames: u64,
    config_path: Option<PathBuf>,
    resolution: Option<(usize, usize)>,
    seed: Option<u64>,
    serial: bool,
    gpu: bool,
}

fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut options = Options {
        frames: 60,
        config_path: None,
        resolution: None,
        seed: None,
        serial: false,
        gpu: false,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--frames" => {
                let value = iter.next().ok_or("--frames requires a value")?;
                options.frames = value
                    .parse()
                    .map_err(|_| format!("invalid frame count '{}'", value))?;
            }
            "--resolution" => {
                let value = iter.next().ok_or("--resolution requires a value")?;
                options.resolution = Some(parse_resolution(value)?);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed requires a value")?;
                options.seed = Some(value.parse().map_err(|_| format!("invalid seed '{}'", value))?);
            }
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--serial" => options.serial = true,
            "--gpu" => options.gpu = true,
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(options)
}

fn parse_resolution(value: &str) -> std::result::Result<(usize, usize), String> {
    let (u, v) = value
        .split_once('x')
        .ok_or_else(|| format!("resolution '{}' is not of the form UxV", value))?;
    let u = u.parse().map_err(|_| format!("invalid u samples '{}'", u))?;
    let v = v.parse().map_err(|_| format!("invalid v samples '{}'", v))?;
    Ok((u, v))
}

fn load_config(options: &Options) -> Result<SurfaceConfig> {
    let mut config = match &options.config_path {
        Some(path) => SurfaceConfig::from_path(path)?,
        None => SurfaceConfig::default(),
    };
    if let Some((u, v)) = options.resolution {
        config.u_samples = u;
        config.v_samples = v;
    }
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    if options.serial {
        config.parallel = false;
    }
    Ok(config)
}

fn run<T: StreamTarget>(config: &SurfaceConfig, target: T, frames: u64) -> Result<()> {
    let mut stream = SurfaceStream::from_config(config, target)?;
    let mut clock = FixedStepClock::sixty_hz();

    for _ in 0..frames {
        let report = stream.frame_from(&mut clock)?;
        log::debug!(
            "t={:.3}s rebuild {:?} upload {:?}",
            report.t_now,
            report.rebuild,
            report.upload
        );
    }

    let stats = stream.stats();
    let resolution = stream.resolution();
    println!("=== Surface Stream Summary ===");
    println!("Grid:            {}x{} samples", resolution.u_samples(), resolution.v_samples());
    println!("Triangles/frame: {}", stream.triangles().triangle_count());
    println!("Bytes/frame:     {}", stream.triangles().byte_len());
    println!("Frames:          {}", stats.frames);
    println!("Average frame:   {:.3} ms", stats.average().as_secs_f64() * 1000.0);
    println!("Worst frame:     {:.3} ms", stats.worst.as_secs_f64() * 1000.0);
    println!(
        "Over budget:     {} (budget {:.2} ms)",
        stats.over_budget,
        stream.frame_budget().as_secs_f64() * 1000.0
    );
    Ok(())
}

#[cfg(feature = "gpu")]
fn run_gpu(config: &SurfaceConfig, frames: u64) -> Result<()> {
    let resolution = Resolution::from_config(config)?;
    let (buffer, _device) = ripple_render::GpuStreamBuffer::headless(resolution)?;
    run(config, buffer, frames)
}

#[cfg(not(feature = "gpu"))]
fn run_gpu(_config: &SurfaceConfig, _frames: u64) -> Result<()> {
    Err(ripple_core::RippleError::Gpu(
        "built without the `gpu` feature".into(),
    ))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}\n", message);
            print_usage();
            process::exit(1);
        }
    };

    let result = load_config(&options).and_then(|config| {
        if options.gpu {
            run_gpu(&config, options.frames)
        } else {
            let bytes = Resolution::from_config(&config)?.byte_size();
            run(&config, HostBuffer::with_capacity(bytes as usize), options.frames)
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(if e.is_fatal() { 2 } else { 1 });
    }
}
