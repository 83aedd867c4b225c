//! Minimal Wavefront OBJ mesh loading.
//!
//! Reads `v` and `f` records into a [`Mesh`]; normals, texture
//! coordinates, groups, and material references are skipped, since the
//! renderer derives normals from winding and maps materials per object
//! in the scene description.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

use crate::mesh::Mesh;

/// Errors that can occur while reading an OBJ file.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: failed to parse vertex: {text}")]
    Vertex { line: usize, text: String },

    #[error("Line {line}: failed to parse face: {text}")]
    Face { line: usize, text: String },

    #[error("Line {line}: vertex index {index} out of range (have {count} vertices)")]
    IndexOutOfRange {
        line: usize,
        index: i64,
        count: usize,
    },

    #[error("OBJ file contains no faces")]
    Empty,
}

/// Load a triangle mesh from an OBJ file.
///
/// Faces with more than three vertices are fan-triangulated. Indices
/// may be 1-based or negative (relative to the end of the vertex list),
/// per the OBJ convention.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let number = number + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                positions.push(parse_vertex(fields, number, line)?);
            }
            Some("f") => {
                parse_face(fields, number, line, positions.len(), &mut indices)?;
            }
            // Normals/UVs are recomputed or unused; grouping records are
            // informational only.
            Some("vn") | Some("vt") | Some("vp") | Some("g") | Some("o") | Some("s")
            | Some("usemtl") | Some("mtllib") => {
                log::trace!("obj: skipping record: {}", line);
            }
            _ => {
                log::warn!("obj: unknown record on line {}: {}", number, line);
            }
        }
    }

    if indices.is_empty() {
        return Err(ObjError::Empty);
    }

    log::debug!(
        "Loaded mesh: {} ({} vertices, {} triangles)",
        path.display(),
        positions.len(),
        indices.len() / 3
    );

    Ok(Mesh::new(positions, indices))
}

fn parse_vertex<'a>(
    mut fields: impl Iterator<Item = &'a str>,
    line: usize,
    text: &str,
) -> Result<Vec3, ObjError> {
    let mut next = || -> Result<f32, ObjError> {
        fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| ObjError::Vertex {
                line,
                text: text.to_string(),
            })
    };
    Ok(Vec3::new(next()?, next()?, next()?))
}

fn parse_face<'a>(
    fields: impl Iterator<Item = &'a str>,
    line: usize,
    text: &str,
    vertex_count: usize,
    indices: &mut Vec<u32>,
) -> Result<(), ObjError> {
    let mut face: Vec<u32> = Vec::with_capacity(4);

    for field in fields {
        // Fields look like "i", "i/t", "i//n", or "i/t/n"; only the
        // position index matters here.
        let position = field.split('/').next().unwrap_or("");
        let raw: i64 = position.parse().map_err(|_| ObjError::Face {
            line,
            text: text.to_string(),
        })?;

        let resolved = if raw > 0 {
            raw - 1
        } else if raw < 0 {
            vertex_count as i64 + raw
        } else {
            return Err(ObjError::Face {
                line,
                text: text.to_string(),
            });
        };

        if resolved < 0 || resolved >= vertex_count as i64 {
            return Err(ObjError::IndexOutOfRange {
                line,
                index: raw,
                count: vertex_count,
            });
        }
        face.push(resolved as u32);
    }

    if face.len() < 3 {
        return Err(ObjError::Face {
            line,
            text: text.to_string(),
        });
    }

    // Fan triangulation around the first vertex
    for i in 1..face.len() - 1 {
        indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
    }

    Ok(())
}
