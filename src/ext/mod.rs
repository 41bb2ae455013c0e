mod virtual_path_ext;

pub use virtual_path_ext::{
    VirtualPathExt, normalize_separators, normalize_virtual_path, resolve_virtual_path,
};
