pub mod dashboard_dto;

pub use dashboard_dto::{
    CategoryVolumeDto, DashboardStatsDto, DepartmentVolumeDto, PublicStatsDto,
};
