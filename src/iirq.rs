use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Error};
use clap::{arg, crate_version, Command};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use iirq::{coeffs, Coefficients, Df1Cascade, Df2Cascade, Filter, SecondOrder};

/// Reads raw signed 16-bit little-endian samples until EOF.
fn raw_samples<R: Read>(reader: R) -> Result<Vec<i16>, Error> {
    let mut samples = Vec::new();
    let mut bytes = reader.bytes();
    while let Some(a) = bytes.next() {
        let a = a?;
        let b = bytes
            .next()
            .ok_or_else(|| anyhow!("Unexpected end of input (expected an even number of bytes)"))??;
        samples.push(i16::from_le_bytes([a, b]));
    }
    Ok(samples)
}

/// Reads a WAV file into interleaved 16-bit samples, rescaling other bit
/// depths and float data into the i16 range.
fn wav_samples<R: Read>(wav: WavReader<R>) -> Result<(Vec<i16>, u16, u32), Error> {
    let spec = wav.spec();
    let samples = match spec.sample_format {
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            if bits > 32 {
                bail!("Unsupported bit depth: {}", bits);
            }
            wav.into_samples::<i32>()
                .map(|s| {
                    s.map(|s| {
                        if bits < 16 {
                            (s << (16 - bits)) as i16
                        } else {
                            (s >> (bits - 16)) as i16
                        }
                    })
                    .map_err(Error::from)
                })
                .collect::<Result<Vec<i16>, Error>>()?
        }
        SampleFormat::Float => wav
            .into_samples::<f32>()
            .map(|s| {
                s.map(|x| (x * 32767.0).clamp(-32768.0, 32767.0) as i16)
                    .map_err(Error::from)
            })
            .collect::<Result<Vec<i16>, Error>>()?,
    };
    Ok((samples, spec.channels, spec.sample_rate))
}

/// Averages interleaved channels down to the mono stream the filters expect.
fn mix_to_mono(samples: &[i16], channels: usize) -> Vec<i16> {
    if channels == 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}

fn build_filter<'c>(form: &str, coeffs: &'c Coefficients) -> Result<Filter<'c>, Error> {
    // "ia" is accepted for callers porting scripts that named the second
    // concurrent form I path separately; it is the same filter.
    Ok(match form {
        "i" | "ia" => Filter::Df1(Df1Cascade::new(coeffs)),
        "ii" => Filter::Df2(Df2Cascade::new(coeffs)),
        "second-order" => Filter::SecondOrder(SecondOrder::new(coeffs)),
        "bypass" => Filter::Bypass,
        other => bail!(
            "Unknown filter form \"{}\" (expected i, ia, ii, second-order or bypass)",
            other
        ),
    })
}

fn main() -> Result<(), Error> {
    let matches = Command::new("iirq")
        .version(crate_version!())
        .about("Filter 16-bit audio through fixed-point IIR cascades")
        .arg(arg!([INPUT] "input audio file"))
        .arg(arg!([OUTPUT] "output audio file"))
        .arg(arg!(--filter <NAME> "name of a compiled-in coefficient table").required(false))
        .arg(
            arg!(--form <FORM> "filter structure: i, ia, ii, second-order or bypass")
                .required(false)
                .default_value("i"),
        )
        .arg(arg!(--"wav-in" "the input is a wav file (default is to detect wav files by their filename)"))
        .arg(arg!(--"wav-out" "the output is a wav file (default is to detect wav files by their filename)"))
        .arg(
            arg!(--channels <CHANNELS> "for raw input, the number of interleaved channels (defaults to 1)")
                .required(false)
                .validator(|s| s.parse::<u16>()),
        )
        .arg(
            arg!(--"sample-rate" <RATE> "for raw input, the sample rate recorded in wav output (defaults to 48kHz)")
                .required(false)
                .validator(|s| s.parse::<u32>()),
        )
        .arg(arg!(--list "list the compiled-in coefficient tables and exit"))
        .get_matches();

    if matches.is_present("list") {
        for (name, _) in coeffs::NAMED {
            println!("{}", name);
        }
        return Ok(());
    }

    let in_name = matches
        .value_of("INPUT")
        .ok_or_else(|| anyhow!("No input file given"))?;
    let out_name = matches
        .value_of("OUTPUT")
        .ok_or_else(|| anyhow!("No output file given"))?;
    let filter_name = matches
        .value_of("filter")
        .ok_or_else(|| anyhow!("No filter given (try --list for the table names)"))?;
    let coeffs = coeffs::by_name(filter_name)
        .ok_or_else(|| anyhow!("Unknown filter \"{}\" (try --list)", filter_name))?;
    let mut filter = build_filter(matches.value_of("form").unwrap_or("i"), coeffs)?;

    let in_file = BufReader::new(
        File::open(in_name).with_context(|| format!("Failed to open input file \"{}\"", in_name))?,
    );
    let in_wav =
        matches.is_present("wav-in") || Path::new(in_name).extension() == Some("wav".as_ref());
    let out_wav =
        matches.is_present("wav-out") || Path::new(out_name).extension() == Some("wav".as_ref());

    let (samples, channels, sample_rate) = if in_wav {
        let (samples, channels, rate) = wav_samples(WavReader::new(in_file)?)?;
        (samples, channels as usize, rate)
    } else {
        let channels: u16 = matches.value_of_t("channels").unwrap_or(1);
        if channels == 0 {
            bail!("--channels must be at least 1");
        }
        let rate: u32 = matches.value_of_t("sample-rate").unwrap_or(48_000);
        (raw_samples(in_file)?, channels as usize, rate)
    };

    let filtered: Vec<i16> = mix_to_mono(&samples, channels)
        .into_iter()
        .map(|s| filter.process(s))
        .collect();

    let out_file = BufWriter::new(
        File::create(out_name)
            .with_context(|| format!("Failed to open output file \"{}\"", out_name))?,
    );
    if out_wav {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::new(out_file, spec)?;
        let mut i16_writer = writer.get_i16_writer(filtered.len() as u32);
        for &s in &filtered {
            i16_writer.write_sample(s);
        }
        i16_writer.flush()?;
        writer.finalize()?;
    } else {
        let mut out_file = out_file;
        for &s in &filtered {
            out_file.write_all(&s.to_le_bytes())?;
        }
        out_file.flush()?;
    }

    Ok(())
}
