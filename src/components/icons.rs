//! Centralized icon definitions.
//!
//! Maps semantic icon names to Lucide glyphs so components never spell a
//! concrete icon set. Swapping the set means editing this file only.

pub use icondata::{
    LuArrowUp as ARROW_UP, LuBookOpen as FILE_PDF, LuBug as BUG, LuChevronDown as CHEVRON_DOWN,
    LuChevronLeft as CHEVRON_LEFT, LuChevronRight as CHEVRON_RIGHT, LuChevronUp as CHEVRON_UP,
    LuCloud as CLOUD, LuDownload as DOWNLOAD, LuEllipsisVertical as MORE,
    LuExternalLink as EXTERNAL_LINK, LuEye as EYE, LuEyeOff as EYE_OFF, LuFile as FILE,
    LuFileCode as FILE_CODE, LuFileText as FILE_TEXT, LuFolder as FOLDER,
    LuFolderOpen as FOLDER_OPEN, LuHardDrive as HARD_DRIVE, LuHouse as HOME,
    LuImage as FILE_IMAGE, LuLayoutGrid as GRID, LuList as LIST, LuLock as LOCK,
    LuPanelLeft as SIDEBAR, LuRotateCw as REFRESH, LuSearch as SEARCH, LuTrash2 as TRASH,
    LuTriangleAlert as WARNING, LuX as CLOSE,
};
