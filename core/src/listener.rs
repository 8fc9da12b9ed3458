use std::sync::Arc;

/// Receives start/finish notifications from whoever performs a data load.
///
/// `data_loading_end` is sent whether the load succeeded or not.
pub trait DataLoadListener: Send + Sync {
    fn data_loading_begin(&self);
    fn data_loading_end(&self);
}

impl<L: DataLoadListener + ?Sized> DataLoadListener for Arc<L> {
    fn data_loading_begin(&self) {
        (**self).data_loading_begin()
    }

    fn data_loading_end(&self) {
        (**self).data_loading_end()
    }
}

impl<L: DataLoadListener + ?Sized> DataLoadListener for &L {
    fn data_loading_begin(&self) {
        (**self).data_loading_begin()
    }

    fn data_loading_end(&self) {
        (**self).data_loading_end()
    }
}
