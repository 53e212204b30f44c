//! MagickCore provider
//!
//! Binds the `GetMagick*` introspection calls of the linked library. The
//! library name and search path come from build.rs.

use std::ffi::{c_char, CStr};

use crate::provider::BuildInfoProvider;

mod ffi {
    use std::ffi::{c_char, c_void};

    extern "C" {
        pub fn GetMagickVersion(version: *mut usize) -> *const c_char;
        pub fn GetMagickReleaseDate() -> *const c_char;
        pub fn GetMagickQuantumRange(range: *mut usize) -> *const c_char;
        pub fn GetMagickQuantumDepth(depth: *mut usize) -> *const c_char;
        pub fn GetMagickPackageName() -> *const c_char;
        pub fn GetMagickLicense() -> *const c_char;
        /// Caller owns the result and must relinquish it.
        pub fn GetMagickHomeURL() -> *mut c_char;
        pub fn GetMagickFeatures() -> *const c_char;
        pub fn GetMagickDelegates() -> *const c_char;
        pub fn GetMagickCopyright() -> *const c_char;
        pub fn RelinquishMagickMemory(memory: *mut c_void) -> *mut c_void;
    }
}

/// Copy a C string owned by MagickCore; null becomes the empty string.
///
/// # Safety
/// `ptr` must be null or point at a NUL-terminated string that stays valid
/// for the duration of the call.
unsafe fn owned_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Answers every query from the MagickCore library linked into this binary.
///
/// The introspection calls read static build configuration and need no
/// `MagickCoreGenesis`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MagickCore;

impl MagickCore {
    pub fn new() -> Self {
        Self
    }
}

impl BuildInfoProvider for MagickCore {
    fn version(&self) -> (String, usize) {
        let mut number = 0usize;
        let text = unsafe { owned_string(ffi::GetMagickVersion(&mut number)) };
        (text, number)
    }

    fn release_date(&self) -> String {
        unsafe { owned_string(ffi::GetMagickReleaseDate()) }
    }

    fn quantum_range(&self) -> (String, usize) {
        let mut range = 0usize;
        let text = unsafe { owned_string(ffi::GetMagickQuantumRange(&mut range)) };
        (text, range)
    }

    fn quantum_depth(&self) -> (String, usize) {
        let mut depth = 0usize;
        let text = unsafe { owned_string(ffi::GetMagickQuantumDepth(&mut depth)) };
        (text, depth)
    }

    fn package_name(&self) -> String {
        unsafe { owned_string(ffi::GetMagickPackageName()) }
    }

    fn license(&self) -> String {
        unsafe { owned_string(ffi::GetMagickLicense()) }
    }

    fn home_url(&self) -> String {
        unsafe {
            let ptr = ffi::GetMagickHomeURL();
            let url = owned_string(ptr);
            if !ptr.is_null() {
                ffi::RelinquishMagickMemory(ptr.cast());
            }
            url
        }
    }

    fn features(&self) -> String {
        unsafe { owned_string(ffi::GetMagickFeatures()) }
    }

    fn delegates(&self) -> String {
        unsafe { owned_string(ffi::GetMagickDelegates()) }
    }

    fn copyright(&self) -> String {
        unsafe { owned_string(ffi::GetMagickCopyright()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::BuildInfo;
    use crate::profile::BuildProfile;

    #[test]
    fn test_null_pointer_is_empty_string() {
        assert_eq!(unsafe { owned_string(std::ptr::null()) }, "");
    }

    #[test]
    fn test_linked_library_reports_itself() {
        let info = BuildInfo::collect(&MagickCore::new());
        assert_eq!(info.package_name, "ImageMagick");
        assert!(info.version.contains(&info.package_name));
        assert!(BuildProfile::from_build_info(&info).is_ok());
    }
}
