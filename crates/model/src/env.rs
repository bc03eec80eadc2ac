/// Environment variable containing the name of the target DynamoDB table
pub const TABLE_NAME: &str = "TABLE_NAME";
