use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use bytemuck::{Pod, Zeroable};

use super::{PointCloud, Sample};

/// Sample laid out the same way as the vertex element in the PLY header.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct PackedSample {
    position: [f32; 3],
    colour: [f32; 3],
    alpha: f32,
}

impl From<&Sample> for PackedSample {
    fn from(sample: &Sample) -> Self {
        PackedSample {
            position: sample.position.coords.into(),
            colour: [sample.colour.r, sample.colour.g, sample.colour.b],
            alpha: sample.alpha,
        }
    }
}

const PROPERTIES: [&str; 7] = ["x", "y", "z", "red", "green", "blue", "alpha"];

impl PointCloud {
    /// Writes the samples as a binary PLY file with float vertex properties
    /// x, y, z, red, green, blue and alpha, in native byte order.
    pub fn write_ply(&self, mut writer: impl Write) -> io::Result<()> {
        let format = if cfg!(target_endian = "little") {
            "binary_little_endian"
        } else {
            "binary_big_endian"
        };

        writeln!(writer, "ply")?;
        writeln!(writer, "format {format} 1.0")?;
        writeln!(writer, "comment generated by bouncelight")?;
        writeln!(writer, "element vertex {}", self.len())?;
        for property in PROPERTIES {
            writeln!(writer, "property float {property}")?;
        }
        writeln!(writer, "end_header")?;

        let packed: Vec<PackedSample> = self.iter().map(PackedSample::from).collect();
        writer.write_all(bytemuck::cast_slice(&packed))?;

        Ok(())
    }

    pub fn save_ply(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_ply(&mut writer)?;
        writer.flush()
    }
}
