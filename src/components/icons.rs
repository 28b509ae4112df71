//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArchive as FileArchive, LuArrowUp as ArrowUp, LuBan as Failure, LuBookOpen as FilePdf,
        LuCheck as Success, LuChevronRight as ChevronRight, LuCode as FileCode,
        LuDownload as Download, LuFile as File, LuFileText as FileText, LuFilm as FileVideo,
        LuFolder as Folder, LuFolderPlus as FolderPlus, LuHouse as Home, LuImage as FileImage,
        LuInfo as Info, LuLayers as Depth, LuLayoutGrid as Grid, LuList as List,
        LuLogIn as Login, LuLogOut as Logout, LuMapPin as Location, LuMusic as FileAudio,
        LuRefreshCw as Refresh, LuSearch as Search, LuShare2 as Share,
        LuShieldAlert as Warning, LuTrash2 as Trash, LuUpload as Upload, LuUser as User,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsArrowUp as ArrowUp, BsBoxArrowInRight as Login,
        BsBoxArrowRight as Logout, BsCheckCircle as Success, BsChevronRight as ChevronRight,
        BsDownload as Download, BsExclamationTriangle as Warning, BsFileEarmark as File,
        BsFileEarmarkCode as FileCode, BsFileEarmarkImage as FileImage,
        BsFileEarmarkMusic as FileAudio, BsFileEarmarkPdf as FilePdf,
        BsFileEarmarkPlay as FileVideo, BsFileEarmarkText as FileText,
        BsFileEarmarkZip as FileArchive, BsFolderFill as Folder, BsFolderPlus as FolderPlus,
        BsGeoAltFill as Location, BsGrid as Grid, BsHouseFill as Home, BsInfoCircle as Info,
        BsLayers as Depth, BsListUl as List, BsPerson as User, BsSearch as Search,
        BsShare as Share, BsTrash as Trash, BsUpload as Upload, BsXCircle as Failure,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

// Navigation
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(HOME, Home);
themed_icon!(ARROW_UP, ArrowUp);
themed_icon!(REFRESH, Refresh);
themed_icon!(SEARCH, Search);
themed_icon!(LIST, List);
themed_icon!(GRID, Grid);

// Entries
themed_icon!(FOLDER, Folder);
themed_icon!(FILE, File);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(FILE_PDF, FilePdf);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(FILE_VIDEO, FileVideo);
themed_icon!(FILE_AUDIO, FileAudio);
themed_icon!(FILE_ARCHIVE, FileArchive);
themed_icon!(FILE_CODE, FileCode);

// Actions
themed_icon!(FOLDER_PLUS, FolderPlus);
themed_icon!(UPLOAD, Upload);
themed_icon!(DOWNLOAD, Download);
themed_icon!(SHARE, Share);
themed_icon!(TRASH, Trash);
themed_icon!(CLOSE, Close);
themed_icon!(LOGIN, Login);
themed_icon!(LOGOUT, Logout);

// Status
themed_icon!(USER, User);
themed_icon!(LOCATION, Location);
themed_icon!(DEPTH, Depth);
themed_icon!(SUCCESS, Success);
themed_icon!(FAILURE, Failure);
themed_icon!(WARNING, Warning);
themed_icon!(INFO, Info);
