//! Concrete collaborators backed by the host desktop and filesystem.

mod data_areas;
mod desktop_notifier;
mod install_identity;
mod system_viewer;
mod update_history;

pub(crate) use {
    data_areas::DirectoryAreaDiscovery, desktop_notifier::DesktopNotifier,
    install_identity::FileInstallIdentity, system_viewer::SystemViewer,
    update_history::FileUpdateHistory,
};
