use clap::{App, Arg, ArgMatches};
use fractalcalc::accelerator;
use fractalcalc::raster::{A, B, BYTES_PER_PIXEL, G, R};
use fractalcalc::{sequential, ParallelRenderer, RenderError, Strategy, View};
use image::ColorType;
use log::info;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const SCALE: &str = "scale";
const OFFSET: &str = "offset";
const ITERATIONS: &str = "iterations";
const STRATEGY: &str = "strategy";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractal")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output image file; the format follows the extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| match parse_pair::<u16>(&s, 'x') {
                    Some((w, h)) if w > 0 && h > 0 => Ok(()),
                    Some(_) => Err("Image dimensions must be positive".to_string()),
                    None => Err("Could not parse output image size".to_string()),
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(SCALE)
                .required(false)
                .long(SCALE)
                .short("z")
                .takes_value(true)
                .default_value("200")
                .validator(|s| match f32::from_str(&s) {
                    Ok(v) if v != 0.0 && v.is_finite() => Ok(()),
                    Ok(_) => Err("Scale must be finite and non-zero".to_string()),
                    Err(_) => Err("Could not parse scale".to_string()),
                })
                .help("Pixels per unit of the complex plane"),
        )
        .arg(
            Arg::with_name(OFFSET)
                .required(false)
                .long(OFFSET)
                .short("f")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f32>(&s, ',', "Could not parse view offset"))
                .help("Horizontal and vertical view offset, in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        2,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 2 and 200000",
                    )
                })
                .help("Maximum iterations per pixel"),
        )
        .arg(
            Arg::with_name(STRATEGY)
                .required(false)
                .long(STRATEGY)
                .short("m")
                .takes_value(true)
                .possible_values(&["sequential", "parallel", "accelerator"])
                .default_value("parallel")
                .help("Which driver renders the image"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads for the parallel driver"),
        )
        .get_matches()
}

/// The library hands back BGRA; image encoders want RGBA.
fn bgra_to_rgba(colors: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(colors.len());
    for bgra in colors.chunks(BYTES_PER_PIXEL) {
        rgba.extend_from_slice(&[bgra[R], bgra[G], bgra[B], bgra[A]]);
    }
    rgba
}

fn render(
    strategy: Strategy,
    threads: Option<usize>,
    colors: &mut [u8],
    size: (usize, usize),
    view: View,
    iterations: u32,
) -> Result<(), RenderError> {
    match (strategy, threads) {
        (Strategy::Parallel, Some(threads)) => {
            ParallelRenderer::new(threads)?.render(colors, size.0, size.1, view, iterations)
        }
        (Strategy::Parallel, None) => {
            ParallelRenderer::default().render(colors, size.0, size.1, view, iterations)
        }
        (Strategy::Sequential, _) => sequential::render(colors, size.0, size.1, view, iterations),
        (Strategy::Accelerator, _) => {
            accelerator::render(colors, size.0, size.1, view, iterations)
        }
    }
}

fn main() {
    env_logger::init();
    let matches = args();
    let size: (u16, u16) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let size = (size.0 as usize, size.1 as usize);
    let scale = f32::from_str(matches.value_of(SCALE).unwrap()).expect("Error parsing scale");
    let offset: (f32, f32) =
        parse_pair(matches.value_of(OFFSET).unwrap(), ',').expect("Error parsing view offset");
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let strategy = Strategy::from_str(matches.value_of(STRATEGY).unwrap())
        .expect("Could not parse strategy.");
    let threads = matches
        .value_of(THREADS)
        .map(|t| usize::from_str(t).expect("Could not parse thread count."));

    let view = View::new(scale, offset.0, offset.1);
    let mut colors = vec![0u8; size.0 * size.1 * BYTES_PER_PIXEL];
    info!("rendering {}x{} with the {} driver", size.0, size.1, strategy);

    if let Err(e) = render(strategy, threads, &mut colors, size, view, iterations) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }

    let output = matches.value_of(OUTPUT).unwrap();
    let rgba = bgra_to_rgba(&colors);
    if let Err(e) = image::save_buffer(
        output,
        &rgba,
        size.0 as u32,
        size.1 as u32,
        ColorType::RGBA(8),
    ) {
        eprintln!("Could not write {}: {}", output, e);
        std::process::exit(1);
    }
    info!("wrote {}", output);
}
