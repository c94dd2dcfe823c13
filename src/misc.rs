use {
    std::{
        io::{Write, BufReader, BufWriter},
        process::{exit, Command, Output},
        path::Path,
        fmt::Display
    },
    fs_err::File,
    serde_json::Value,
    serde::{Serialize, Deserialize, de::DeserializeOwned},
    indicatif::{ProgressBar, ProgressStyle},
};


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_HASH: &str = env!("GIT_HASH");
pub const BUILD_TIME: &str = env!("BUILD_TIME_CHRONO");

pub fn write_json<W: Write>(mut writer: W, json: &Value) -> std::io::Result<()>
{
    write!(writer, "#")?;
    serde_json::to_writer(&mut writer, json)?;
    writeln!(writer)
}

pub fn indication_bar(len: u64) -> ProgressBar
{
        // for indication on when it is finished
        let bar = ProgressBar::new(len);
        bar.set_style(ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise} - {eta_precise}] {wide_bar}")
            .expect("progress template is valid")
        );
        bar
}

pub fn create_buf<P>(path: P) -> std::io::Result<BufWriter<File>>
where P: AsRef<Path>
{
    let file = File::create(path.as_ref())?;
    Ok(BufWriter::new(file))
}

pub fn write_commands<W: Write>(mut w: W) -> std::io::Result<()>
{
    write!(w, "#")?;
    for arg in std::env::args()
    {
        write!(w, " {arg}")?;
    }
    writeln!(w)
}

pub fn write_commands_and_version<W: Write>(mut w: W) -> std::io::Result<()>
{
    writeln!(w, "# {VERSION} {} built {BUILD_TIME}", GIT_HASH.trim())?;
    write_commands(w)
}

pub fn create_buf_with_command_and_version<P>(path: P) -> std::io::Result<BufWriter<File>>
where P: AsRef<Path>
{
    let mut buf = create_buf(path)?;
    write_commands_and_version(&mut buf)?;
    Ok(buf)
}

pub fn create_buf_with_command_and_version_and_header<P, S, D>(path: P, header: S) -> std::io::Result<BufWriter<File>>
where P: AsRef<Path>,
    S: IntoIterator<Item=D>,
    D: Display
{
    let mut buf = create_buf_with_command_and_version(path)?;
    write_slice_head(&mut buf, header)?;
    Ok(buf)
}

pub fn write_slice_head<W, S, D>(mut w: W, slice: S) -> std::io::Result<()>
where W: std::io::Write,
    S: IntoIterator<Item=D>,
    D: Display
{
    write!(w, "#")?;
    for (s, i) in slice.into_iter().zip(1_u16..){
        write!(w, " {s}_{i}")?;
    }
    writeln!(w)
}

pub fn parse<P, T>(file: Option<P>) -> T
where P: AsRef<Path>,
    T: Default + Serialize + DeserializeOwned
{
    match file
    {
        None => {
            let example = T::default();
            serde_json::to_writer_pretty(
                std::io::stdout(),
                &example
            ).expect("Unable to reach stdout");
            exit(0)
        },
        Some(file) => {
            match parse_file(file)
            {
                Ok(o) => o,
                Err(e) => {
                    tracing::error!(error = %e, "json parsing error!");
                    exit(1);
                }
            }
        }
    }
}

pub fn parse_file<P, T>(file: P) -> crate::error::Result<T>
where P: AsRef<Path>,
    T: DeserializeOwned
{
    let f = File::open(file.as_ref())?;
    let buf = BufReader::new(f);
    let json_val: Value = serde_json::from_reader(buf)?;
    Ok(serde_json::from_value(json_val)?)
}

pub trait PrintAlternatives{
    fn print_alternatives(layer: u8);
}

pub(crate) fn print_spaces(layer: u8){
    for _ in 0..layer{
        print!(" ");
    }
}

#[derive(Debug, Clone, Serialize, Default, Deserialize, PartialEq)]
pub struct SampleRangeF64
{
    pub start: f64,
    pub end: f64,
    pub samples: usize
}

impl SampleRangeF64{
    pub fn get_iter(&'_ self) -> impl Iterator<Item=f64> + '_
    {
        let delta = (self.end - self.start) / (self.samples.max(2) - 1) as f64;
        (0..self.samples.saturating_sub(1))
            .map(
                move |i|
                {
                    self.start + delta * i as f64
                }
            ).chain((self.samples > 0).then_some(self.end))
    }
}

pub fn create_gnuplot_buf<P>(path: P) -> std::io::Result<BufWriter<File>>
where P: AsRef<Path>
{
    // gnuplot treats '#' lines as comments, same header as the data files
    create_buf_with_command_and_version(path)
}

pub fn call_gnuplot<P>(gp_file: P) -> std::io::Result<Output>
where P: AsRef<Path>
{
    Command::new("gnuplot")
        .arg(gp_file.as_ref())
        .output()
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn sample_range_hits_both_ends()
    {
        let range = SampleRangeF64 { start: 2.0, end: 3.0, samples: 11 };
        let v: Vec<f64> = range.get_iter().collect();
        assert_eq!(v.len(), 11);
        assert_eq!(v[0], 2.0);
        assert_eq!(v[10], 3.0);
        assert!((v[5] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn sample_range_degenerate()
    {
        let one = SampleRangeF64 { start: 2.0, end: 3.0, samples: 1 };
        assert_eq!(one.get_iter().collect::<Vec<_>>(), vec![3.0]);
        let none = SampleRangeF64 { start: 2.0, end: 3.0, samples: 0 };
        assert_eq!(none.get_iter().count(), 0);
    }

    #[test]
    fn slice_head_is_numbered()
    {
        let mut out = Vec::new();
        write_slice_head(&mut out, ["z", "N"]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "# z_1 N_2\n");
    }
}
