#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        keywords: [ $($kw:expr),* $(,)? ],
        response: $response:expr
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            keywords: &[ $($kw),* ],
            response: $response,
        }
    }};
}
