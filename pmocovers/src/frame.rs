use crate::error::{CoverError, Result};

/// Bitmap brut prêt à être poussé vers la matrice
///
/// RGB 8 bits, lignes contiguës, sans padding : la longueur vaut toujours
/// `resolution * resolution * 3`.
#[derive(Clone, PartialEq, Eq)]
pub struct NormalizedFrame {
    resolution: u32,
    data: Vec<u8>,
}

impl NormalizedFrame {
    /// Nombre d'octets d'une frame carrée de côté `resolution`
    pub fn expected_len(resolution: u32) -> usize {
        let side = resolution as usize;
        side * side * 3
    }

    /// Construit une frame en vérifiant la taille du buffer
    ///
    /// # Errors
    ///
    /// * `CoverError::FrameSize` - le buffer n'a pas exactement la taille attendue
    pub fn new(resolution: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::expected_len(resolution);
        if data.len() != expected {
            return Err(CoverError::FrameSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { resolution, data })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl std::fmt::Debug for NormalizedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizedFrame")
            .field("resolution", &self.resolution)
            .field("bytes", &self.data.len())
            .finish()
    }
}
