mod package;

pub use package::{Coordinates, NewPackage, Package, PackageStatus, ProcurementType};
