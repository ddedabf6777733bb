/// A `db::Builder` with the standard languages and the given models.
#[macro_export]
macro_rules! models {
    (
        $( $model:expr ),*
    ) => {{
        let mut builder = multilingual::Db::builder();
        builder.languages($crate::setup::languages());
        $( builder.register($model); )*
        builder
    }};
}
