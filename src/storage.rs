//! Secure Storage Module
//!
//! Durable string entries for the session, encrypted with DPAPI on Windows.

use std::path::{Path, PathBuf};
use tracing::{info, error, debug};

#[cfg(windows)]
use windows::Win32::Security::Cryptography::{
    CryptProtectData, CryptUnprotectData, CRYPTPROTECT_UI_FORBIDDEN,
};
#[cfg(windows)]
use windows::Win32::Security::Cryptography::CRYPT_INTEGER_BLOB;

/// Secure storage using Windows DPAPI for encryption
#[derive(Debug, Clone)]
pub struct SecureStorage {
    storage_path: PathBuf,
}

impl SecureStorage {
    /// Create storage under the platform data directory
    pub fn new() -> Self {
        let storage_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("TripPlanner");

        Self::with_path(storage_path)
    }

    /// Create storage rooted at `storage_path`
    pub fn with_path(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();

        if let Err(e) = std::fs::create_dir_all(&storage_path) {
            error!("Failed to create storage directory: {}", e);
        }

        debug!("Secure storage initialized at: {:?}", storage_path);

        Self { storage_path }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Store a string entry
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let encrypted = self.encrypt(value.as_bytes())?;

        std::fs::write(self.entry_path(key), encrypted)
            .map_err(|e| StorageError::Io(e.to_string()))?;

        debug!("Saved encrypted data for key: {}", key);
        Ok(())
    }

    /// Read a string entry; `None` if it was never written
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let encrypted = match std::fs::read(self.entry_path(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        let decrypted = self.decrypt(&encrypted)?;

        String::from_utf8(decrypted)
            .map(Some)
            .map_err(|e| StorageError::Decryption(e.to_string()))
    }

    /// Serialize `data` as JSON into an entry
    pub fn save<T: serde::Serialize>(&self, key: &str, data: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(data)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.set_item(key, &json)
    }

    /// Delete stored data
    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let file_path = self.entry_path(key);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .map_err(|e| StorageError::Io(e.to_string()))?;
            info!("Deleted stored data for key: {}", key);
        }

        Ok(())
    }

    /// Check if key exists
    pub fn exists(&self, key: &str) -> bool {
        self.entry_path(key).exists()
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.storage_path.join(format!("{}.dat", key))
    }

    #[cfg(windows)]
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, StorageError> {
        use std::ptr::null_mut;

        let input = CRYPT_INTEGER_BLOB {
            cbData: data.len() as u32,
            pbData: data.as_ptr() as *mut u8,
        };

        let mut output = CRYPT_INTEGER_BLOB {
            cbData: 0,
            pbData: null_mut(),
        };

        unsafe {
            let result = CryptProtectData(
                &input,
                None,
                None,
                None,
                None,
                CRYPTPROTECT_UI_FORBIDDEN,
                &mut output,
            );

            if result.is_err() {
                return Err(StorageError::Encryption("DPAPI encryption failed".into()));
            }

            let encrypted = std::slice::from_raw_parts(
                output.pbData,
                output.cbData as usize,
            ).to_vec();

            // Buffer is owned by DPAPI
            windows::Win32::Foundation::LocalFree(
                windows::Win32::Foundation::HLOCAL(output.pbData as *mut std::ffi::c_void)
            );

            Ok(encrypted)
        }
    }

    #[cfg(windows)]
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, StorageError> {
        use std::ptr::null_mut;

        let input = CRYPT_INTEGER_BLOB {
            cbData: data.len() as u32,
            pbData: data.as_ptr() as *mut u8,
        };

        let mut output = CRYPT_INTEGER_BLOB {
            cbData: 0,
            pbData: null_mut(),
        };

        unsafe {
            let result = CryptUnprotectData(
                &input,
                None,
                None,
                None,
                None,
                CRYPTPROTECT_UI_FORBIDDEN,
                &mut output,
            );

            if result.is_err() {
                return Err(StorageError::Decryption("DPAPI decryption failed".into()));
            }

            let decrypted = std::slice::from_raw_parts(
                output.pbData,
                output.cbData as usize,
            ).to_vec();

            windows::Win32::Foundation::LocalFree(
                windows::Win32::Foundation::HLOCAL(output.pbData as *mut std::ffi::c_void)
            );

            Ok(decrypted)
        }
    }

    // Plaintext outside Windows
    #[cfg(not(windows))]
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, StorageError> {
        Ok(data.to_vec())
    }

    #[cfg(not(windows))]
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, StorageError> {
        Ok(data.to_vec())
    }
}

impl Default for SecureStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::with_path(dir.path());

        assert_eq!(storage.get_item("token").unwrap(), None);
        assert!(!storage.exists("token"));
    }

    #[test]
    fn entries_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        SecureStorage::with_path(dir.path()).set_item("token", "abc").unwrap();

        let reopened = SecureStorage::with_path(dir.path());
        assert_eq!(reopened.get_item("token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::with_path(dir.path());
        storage.save("user", &serde_json::json!({"id": 1})).unwrap();

        storage.remove_item("user").unwrap();
        storage.remove_item("user").unwrap();
        assert!(!storage.exists("user"));
    }
}
